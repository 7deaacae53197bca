mod cache;
mod parsed_sql;
mod style;
mod tokenizer;

pub use cache::*;
pub use parsed_sql::*;
pub use style::*;
pub use tokenizer::*;

use crate::{Context, LexError, Result, truncate_long};
use std::sync::Arc;

/// Turns a template into a [`ParsedSql`].
///
/// Implementations are shared by every statement using a configuration, so they
/// must be safe to call from many threads at once.
pub trait SqlParser: Send + Sync {
    fn parse(&self, template: &str) -> Result<Arc<ParsedSql>>;
    /// A marker referencing the parameter `name`, as this parser expects it.
    fn name_parameter(&self, name: &str) -> String;
}

/// Parser for templates whose named markers start with a prefix character.
///
/// The colon, hash and dollar conventions are the same parser configured with a
/// different [`ParameterStyle`]. Results are memoized in the [`ParseCache`] owned
/// by this instance.
///
/// ```rust
/// use stencil_core::{PrefixSqlParser, SqlParser};
/// let parser = PrefixSqlParser::colon();
/// let parsed = parser.parse("select * from users where id = :id").unwrap();
/// assert_eq!(parsed.sql(), "select * from users where id = ?");
/// ```
pub struct PrefixSqlParser {
    style: ParameterStyle,
    cache: Box<dyn ParseCache>,
}

impl PrefixSqlParser {
    pub fn new(style: ParameterStyle) -> Self {
        Self::with_cache(style, LruParseCache::new())
    }
    pub fn with_cache(style: ParameterStyle, cache: impl ParseCache + 'static) -> Self {
        Self {
            style,
            cache: Box::new(cache),
        }
    }
    pub fn colon() -> Self {
        Self::new(ParameterStyle::COLON)
    }
    pub fn hash() -> Self {
        Self::new(ParameterStyle::HASH)
    }
    pub fn dollar() -> Self {
        Self::new(ParameterStyle::DOLLAR)
    }
    pub fn style(&self) -> ParameterStyle {
        self.style
    }
    pub fn cache(&self) -> &dyn ParseCache {
        self.cache.as_ref()
    }

    /// Parse without looking at the cache.
    pub fn parse_uncached(&self, template: &str) -> Result<ParsedSql> {
        let mut builder = ParsedSql::builder();
        for token in Tokenizer::new(template, self.style) {
            let token = token?;
            let appended = match token.kind {
                TokenKind::Literal | TokenKind::Quoted | TokenKind::Comment | TokenKind::Escaped => {
                    builder.append_literal(token.text);
                    Ok(())
                }
                TokenKind::Named => builder.append_named(token.text).map(|_| ()),
                TokenKind::Positional => builder.append_positional().map(|_| ()),
            };
            if let Err(kind) = appended {
                return Err(LexError::new(kind, template, token.offset).into());
            }
        }
        Ok(builder.build())
    }
}

impl Default for PrefixSqlParser {
    fn default() -> Self {
        Self::colon()
    }
}

impl SqlParser for PrefixSqlParser {
    fn parse(&self, template: &str) -> Result<Arc<ParsedSql>> {
        if let Some(parsed) = self.cache.get(template) {
            log::trace!("Parse cache hit for:\n{}", truncate_long!(template));
            return Ok(parsed);
        }
        log::debug!("Parse cache miss for:\n{}", truncate_long!(template));
        let parsed = self
            .parse_uncached(template)
            .with_context(|| {
                format!(
                    "Exception parsing for named parameter replacement:\n{}",
                    truncate_long!(template)
                )
            })
            .inspect_err(|error| log::error!("{:#}", error))?;
        Ok(self.cache.insert(template, Arc::new(parsed)))
    }

    fn name_parameter(&self, name: &str) -> String {
        self.style.marker(name)
    }
}
