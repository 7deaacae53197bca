use crate::{Context, Result, TemplateAttributeError, truncate_long};
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

/// Name to string table used to render `<name>` references.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }
    /// Define `key`, replacing any previous definition.
    pub fn define(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.values.insert(key.into(), value.to_string());
        self
    }
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: ToString> Extend<(K, V)> for Attributes {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.define(k, v);
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", k, v)?;
        }
        f.write_str("}")
    }
}

/// Pre-pass rendering a template before it reaches the parser.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, attributes: &Attributes) -> Result<String>;
}

/// Leaves templates untouched.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoTemplateEngine;

impl TemplateEngine for NoTemplateEngine {
    fn render(&self, template: &str, _attributes: &Attributes) -> Result<String> {
        Ok(template.to_owned())
    }
}

/// Replaces `<name>` references with the attribute defined for `name`.
///
/// Quoted literals and comments are copied unchanged, so are `<` characters not
/// opening a well formed reference (`a < b`). `\<` emits a literal `<`, other
/// backslash pairs are kept for the parser. Referencing an undefined attribute
/// fails with [`TemplateAttributeError`].
///
/// ```rust
/// use stencil_core::{Attributes, DefinedAttributeEngine, TemplateEngine};
/// let mut attributes = Attributes::new();
/// attributes.define("table", "users");
/// let sql = DefinedAttributeEngine.render("select * from <table>", &attributes).unwrap();
/// assert_eq!(sql, "select * from users");
/// ```
#[derive(Default, Debug, Clone, Copy)]
pub struct DefinedAttributeEngine;

fn is_attribute_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'.'
}

/// Length of the `<name>` reference at the start of `rest`, if any.
fn reference_len(rest: &[u8]) -> Option<usize> {
    let name = rest[1..].iter().take_while(|c| is_attribute_char(**c)).count();
    (name > 0 && rest.get(1 + name) == Some(&b'>')).then_some(name + 2)
}

impl TemplateEngine for DefinedAttributeEngine {
    fn render(&self, template: &str, attributes: &Attributes) -> Result<String> {
        let bytes = template.as_bytes();
        let mut out = String::with_capacity(template.len());
        let mut copied = 0;
        let mut i = 0;
        while i < bytes.len() {
            let rest = &bytes[i..];
            match rest[0] {
                b'-' if rest.starts_with(b"--") => {
                    i += rest
                        .iter()
                        .position(|c| *c == b'\n' || *c == b'\r')
                        .unwrap_or(rest.len());
                }
                b'/' if rest.starts_with(b"/*") => {
                    i += rest[2..]
                        .windows(2)
                        .position(|w| w == b"*/")
                        .map(|p| p + 4)
                        .unwrap_or(rest.len());
                }
                quote @ (b'\'' | b'"') => {
                    let mut j = 1;
                    while j < rest.len() && rest[j] != quote {
                        j += if quote == b'\'' && rest[j] == b'\\' { 2 } else { 1 };
                    }
                    i += (j + 1).min(rest.len());
                }
                b'\\' if rest.get(1) == Some(&b'<') => {
                    out.push_str(&template[copied..i]);
                    out.push('<');
                    i += 2;
                    copied = i;
                }
                b'\\' => i += 2.min(rest.len()),
                b'<' => match reference_len(rest) {
                    Some(len) => {
                        out.push_str(&template[copied..i]);
                        let token = &template[i..i + len];
                        let Some(value) = attributes.get(&token[1..len - 1]) else {
                            let error = anyhow::Error::new(TemplateAttributeError {
                                token: token.into(),
                            })
                            .context(format!(
                                "Cannot render the template:\n{}",
                                truncate_long!(template)
                            ));
                            log::error!("{:#}", error);
                            return Err(error);
                        };
                        out.push_str(value);
                        i += len;
                        copied = i;
                    }
                    None => i += 1,
                },
                _ => i += 1,
            }
        }
        out.push_str(&template[copied..]);
        Ok(out)
    }
}

/// Renders `template` with `attributes`, attaching the template to any error.
pub fn render_template(
    engine: &dyn TemplateEngine,
    template: &str,
    attributes: &Attributes,
) -> Result<String> {
    engine
        .render(template, attributes)
        .with_context(|| format!("Using attributes {}", attributes))
}
