use crate::LexErrorKind;
use std::{
    borrow::Cow,
    fmt::{self, Display},
};

/// The character standing for one parameter in the rewritten SQL.
pub const PLACEHOLDER: char = '?';

/// Parameters declared by a template, in placeholder order.
///
/// A template is either entirely positional or entirely named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedParameters {
    /// `n` bare `?` markers.
    Positional(usize),
    /// Names in declaration order, a name appears once per marker.
    Named(Vec<String>),
}

impl ParsedParameters {
    /// No parameters at all.
    pub const NONE: ParsedParameters = ParsedParameters::Positional(0);

    pub fn is_positional(&self) -> bool {
        matches!(self, ParsedParameters::Positional(..))
    }

    pub fn len(&self) -> usize {
        match self {
            ParsedParameters::Positional(count) => *count,
            ParsedParameters::Named(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of each placeholder, positional slots are all named `?`.
    pub fn names(&self) -> Cow<'_, [String]> {
        match self {
            ParsedParameters::Positional(count) => {
                Cow::Owned(vec![PLACEHOLDER.to_string(); *count])
            }
            ParsedParameters::Named(names) => Cow::Borrowed(names),
        }
    }

    /// Distinct names in order of first appearance.
    pub fn distinct_names(&self) -> Vec<&str> {
        let ParsedParameters::Named(names) = self else {
            return Vec::new();
        };
        let mut result = Vec::<&str>::with_capacity(names.len());
        for name in names {
            if !result.contains(&name.as_str()) {
                result.push(name);
            }
        }
        result
    }
}

impl Default for ParsedParameters {
    fn default() -> Self {
        Self::NONE
    }
}

/// A template rewritten to single placeholder form, paired with its parameters.
///
/// Immutable once built, parsers share it through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedSql {
    sql: String,
    parameters: ParsedParameters,
}

impl ParsedSql {
    pub fn builder() -> ParsedSqlBuilder {
        ParsedSqlBuilder::default()
    }
    /// Rewritten SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }
    pub fn parameters(&self) -> &ParsedParameters {
        &self.parameters
    }
}

impl Display for ParsedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Accumulates literal text and parameter records, then freezes into a [`ParsedSql`].
#[derive(Debug, Default)]
pub struct ParsedSqlBuilder {
    sql: String,
    names: Vec<String>,
    positional: usize,
}

impl ParsedSqlBuilder {
    pub fn append_literal(&mut self, text: &str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    pub fn append_named(&mut self, name: &str) -> Result<&mut Self, LexErrorKind> {
        if self.positional > 0 {
            return Err(LexErrorKind::MixedParameters);
        }
        self.names.push(name.into());
        self.sql.push(PLACEHOLDER);
        Ok(self)
    }

    pub fn append_positional(&mut self) -> Result<&mut Self, LexErrorKind> {
        if !self.names.is_empty() {
            return Err(LexErrorKind::MixedParameters);
        }
        self.positional += 1;
        self.sql.push(PLACEHOLDER);
        Ok(self)
    }

    pub fn build(self) -> ParsedSql {
        let parameters = if self.names.is_empty() {
            ParsedParameters::Positional(self.positional)
        } else {
            ParsedParameters::Named(self.names)
        };
        ParsedSql {
            sql: self.sql,
            parameters,
        }
    }
}
