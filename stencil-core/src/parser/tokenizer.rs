use super::style::{ParameterStyle, is_name_char};
use crate::{LexError, LexErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Plain SQL text, copied verbatim.
    Literal,
    /// Single or double quoted literal including its quotes.
    Quoted,
    /// Line or block comment including its delimiters.
    Comment,
    /// The character following a backslash, the backslash is dropped.
    Escaped,
    /// Name of a named marker, without the prefix.
    Named,
    /// A bare `?`.
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    /// Byte offset of the token inside the template.
    pub offset: usize,
}

/// Splits a template into [`Token`]s for one [`ParameterStyle`].
///
/// Regions are recognized in this order: comments, quoted literals, backslash
/// escapes, positional markers, named markers, literal text. Quoted and commented
/// regions are never scanned for markers. A doubled prefix (`::`) and a doubled
/// question mark (`??`) are literal text.
pub struct Tokenizer<'s> {
    template: &'s str,
    position: usize,
    prefix: char,
    failed: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(template: &'s str, style: ParameterStyle) -> Self {
        Self {
            template,
            position: 0,
            prefix: style.prefix(),
            failed: false,
        }
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'s> {
        self.position = end;
        Token {
            kind,
            text: &self.template[start..end],
            offset: start,
        }
    }

    fn error(&mut self, kind: LexErrorKind, offset: usize) -> LexError {
        self.failed = true;
        LexError::new(kind, self.template, offset)
    }

    fn starts_region(&self, rest: &str) -> bool {
        rest.starts_with("--")
            || rest.starts_with("/*")
            || rest.starts_with(['\'', '"', '\\', '?'])
            || rest.starts_with(self.prefix)
    }

    fn quoted(&mut self, start: usize, quote: char) -> Result<Token<'s>, LexError> {
        let template = self.template;
        let body = &template[start + 1..];
        let mut chars = body.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' && quote == '\'' {
                chars.next();
            } else if c == quote {
                return Ok(self.emit(TokenKind::Quoted, start, start + 1 + i + 1));
            }
        }
        Err(self.error(LexErrorKind::UnterminatedQuote, start))
    }

    fn named(&mut self, start: usize) -> Result<Token<'s>, LexError> {
        let template = self.template;
        let name_start = start + self.prefix.len_utf8();
        let rest = &template[name_start..];
        let mut end = 0;
        let mut chars = rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if is_name_char(c) {
                end = i + 1;
            } else if c == '.'
                && end == i
                && chars.peek().is_some_and(|(_, next)| is_name_char(*next))
            {
                continue;
            } else {
                if !c.is_ascii() && c.is_alphanumeric() {
                    return Err(self.error(LexErrorKind::InvalidParameterName, name_start + i));
                }
                break;
            }
        }
        self.position = name_start + end;
        Ok(Token {
            kind: TokenKind::Named,
            text: &rest[..end],
            offset: start,
        })
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Result<Token<'s>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.template.len() {
            return None;
        }
        let template = self.template;
        let start = self.position;
        let rest = &template[start..];
        let mut chars = rest.chars();
        let current = chars.next()?;
        let next = chars.next();
        let token = if rest.starts_with("--") {
            let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
            Ok(self.emit(TokenKind::Comment, start, start + end))
        } else if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(end) => Ok(self.emit(TokenKind::Comment, start, start + 2 + end + 2)),
                None => Err(self.error(LexErrorKind::UnterminatedComment, start)),
            }
        } else if current == '\'' || current == '"' {
            self.quoted(start, current)
        } else if current == '\\' {
            match next {
                Some(escaped) => {
                    let from = start + 1;
                    self.position = from + escaped.len_utf8();
                    Ok(Token {
                        kind: TokenKind::Escaped,
                        text: &template[from..self.position],
                        offset: start,
                    })
                }
                None => Ok(self.emit(TokenKind::Literal, start, start + 1)),
            }
        } else if current == '?' {
            if next == Some('?') {
                Ok(self.emit(TokenKind::Literal, start, start + 2))
            } else {
                Ok(self.emit(TokenKind::Positional, start, start + 1))
            }
        } else if current == self.prefix {
            let len = current.len_utf8();
            match next {
                Some(c) if c == self.prefix => {
                    Ok(self.emit(TokenKind::Literal, start, start + len * 2))
                }
                Some(c) if is_name_char(c) => self.named(start),
                Some(c) if !c.is_ascii() => {
                    Err(self.error(LexErrorKind::InvalidParameterName, start + len))
                }
                _ => Ok(self.emit(TokenKind::Literal, start, start + len)),
            }
        } else {
            let end = rest
                .char_indices()
                .skip(1)
                .find(|(i, _)| self.starts_region(&rest[*i..]))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            Ok(self.emit(TokenKind::Literal, start, start + end))
        };
        Some(token)
    }
}
