mod as_value;
mod batch;
mod binding;
mod config;
mod context;
mod error;
mod finder;
mod parser;
mod prepared;
mod registry;
mod resolver;
mod statement;
mod template;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use batch::*;
pub use binding::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use finder::*;
pub use parser::*;
pub use prepared::*;
pub use registry::*;
pub use resolver::*;
pub use statement::*;
pub use template::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
