use std::fmt::{self, Display};
use thiserror::Error;

/// What went wrong while tokenizing a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A quoted literal runs until the end of the template.
    UnterminatedQuote,
    /// A `/*` comment is never closed.
    UnterminatedComment,
    /// The parameter prefix is followed by characters that cannot form a name.
    InvalidParameterName,
    /// Named and positional markers used in the same template.
    MixedParameters,
}

impl Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LexErrorKind::UnterminatedQuote => "unterminated quoted literal",
            LexErrorKind::UnterminatedComment => "unterminated block comment",
            LexErrorKind::InvalidParameterName => "invalid parameter name",
            LexErrorKind::MixedParameters => "cannot mix named and positional parameters",
        })
    }
}

/// Malformed template.
///
/// `offset` is the byte offset of the failing character inside `template`, the
/// template itself is attached by the parser as error context.
#[derive(Debug, Clone, Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub template: String,
    pub offset: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, template: &str, offset: usize) -> Self {
        Self {
            kind,
            template: template.into(),
            offset,
        }
    }
}

/// A `<name>` attribute reference without a defined value.
#[derive(Debug, Clone, Error)]
#[error("Undefined attribute for token '{token}'")]
pub struct TemplateAttributeError {
    pub token: String,
}

/// The declared parameters and the bound values disagree.
///
/// Each variant lists every offender of its class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingMismatch {
    #[error("Missing positional parameters at (0 based) positions {0:?}")]
    MissingPositional(Vec<usize>),
    #[error("Superfluous positional parameters at (0 based) positions {0:?}")]
    UnusedPositional(Vec<usize>),
    #[error("Missing named parameters {0:?}")]
    MissingNamed(Vec<String>),
    #[error(
        "Superfluous named parameters {0:?}, they are bound but the query does not declare them"
    )]
    UnusedNamed(Vec<String>),
}

/// The type registry could not produce a slot value for an argument.
#[derive(Debug, Error)]
pub enum TypeResolutionError {
    #[error("No argument adapter registered for {value} of type {type_name}")]
    Unregistered { type_name: String, value: String },
    #[error("The argument adapter for type {type_name} rejected {value}")]
    Adapter {
        type_name: String,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
