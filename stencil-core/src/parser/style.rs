use crate::{Error, Result};

/// Named parameter convention of a template: the character introducing a name.
///
/// ```rust
/// use stencil_core::ParameterStyle;
/// assert_eq!(ParameterStyle::COLON.prefix(), ':');
/// assert!(ParameterStyle::custom('@').is_ok());
/// assert!(ParameterStyle::custom('?').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterStyle {
    prefix: char,
}

impl ParameterStyle {
    /// `:name`, the default.
    pub const COLON: ParameterStyle = ParameterStyle { prefix: ':' };
    /// `#name`
    pub const HASH: ParameterStyle = ParameterStyle { prefix: '#' };
    /// `$name`
    pub const DOLLAR: ParameterStyle = ParameterStyle { prefix: '$' };

    /// A style using any other ASCII punctuation character as prefix.
    pub fn custom(prefix: char) -> Result<Self> {
        if !prefix.is_ascii_punctuation()
            || is_name_char(prefix)
            || matches!(prefix, '?' | '\'' | '"' | '\\' | '-' | '/' | '*' | '.')
        {
            return Err(Error::msg(format!(
                "Character `{}` cannot be used as parameter prefix",
                prefix.escape_default()
            )));
        }
        Ok(Self { prefix })
    }

    pub const fn prefix(&self) -> char {
        self.prefix
    }

    /// The marker referencing `name` in this style.
    pub fn marker(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 1);
        out.push(self.prefix);
        out.push_str(name);
        out
    }
}

impl Default for ParameterStyle {
    fn default() -> Self {
        Self::COLON
    }
}

/// Characters a parameter name segment is made of.
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
