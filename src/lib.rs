//! Named-parameter SQL templates.
//!
//! A template such as `select * from <table> where id = :id` is rendered with its
//! attributes, rewritten to `select * from users where id = ?` and paired with
//! the arguments bound by name or position, ready for a prepared statement.
//!
//! ```rust
//! use stencil::{BindArguments, NamedArguments, StatementConfig};
//!
//! #[derive(NamedArguments)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let config = StatementConfig::default();
//! let user = User { id: 1, name: "Alice".into() };
//! let mut statement = config.create_statement("update users set name = :name where id = :id");
//! statement.bind_finder(&user);
//! let rendered = statement.render().unwrap();
//! assert_eq!(rendered.sql(), "update users set name = ? where id = ?");
//! ```
pub use ::stencil_core::*;
pub use ::stencil_macros::*;
