use crate::{Argument, AsValue, StatementContext, Value};
use std::{any, collections::BTreeMap, fmt, sync::Arc};

/// Fallback lookup of a named argument, queried when a name has no direct binding.
///
/// `#[derive(NamedArguments)]` implements it for structs, exposing their fields.
pub trait NamedArgumentFinder {
    fn find(&self, name: &str, context: &StatementContext<'_>) -> Option<Argument>;
    /// Names this finder is known to resolve, used to describe bindings.
    fn names(&self) -> Vec<String> {
        Vec::new()
    }
    fn describe(&self) -> String {
        any::type_name::<Self>().into()
    }
}

impl<T: NamedArgumentFinder + ?Sized> NamedArgumentFinder for &T {
    fn find(&self, name: &str, context: &StatementContext<'_>) -> Option<Argument> {
        (**self).find(name, context)
    }
    fn names(&self) -> Vec<String> {
        (**self).names()
    }
    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: NamedArgumentFinder + ?Sized> NamedArgumentFinder for Box<T> {
    fn find(&self, name: &str, context: &StatementContext<'_>) -> Option<Argument> {
        (**self).find(name, context)
    }
    fn names(&self) -> Vec<String> {
        (**self).names()
    }
    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: NamedArgumentFinder + ?Sized> NamedArgumentFinder for Arc<T> {
    fn find(&self, name: &str, context: &StatementContext<'_>) -> Option<Argument> {
        (**self).find(name, context)
    }
    fn names(&self) -> Vec<String> {
        (**self).names()
    }
    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Arguments taken from a name to value map.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MapArguments {
    values: BTreeMap<String, Value>,
}

impl MapArguments {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, name: impl Into<String>, value: impl AsValue) -> &mut Self {
        self.values.insert(name.into(), value.as_value());
        self
    }
}

impl<K: Into<String>, V: AsValue> FromIterator<(K, V)> for MapArguments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.as_value()))
                .collect(),
        }
    }
}

impl NamedArgumentFinder for MapArguments {
    fn find(&self, name: &str, _context: &StatementContext<'_>) -> Option<Argument> {
        self.values.get(name).cloned().map(Argument::Value)
    }
    fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
    fn describe(&self) -> String {
        let mut out = String::from("{");
        crate::separated_by(
            &mut out,
            self.values.iter(),
            |out, (k, v)| {
                out.push_str(k);
                out.push(':');
                out.push_str(&v.to_string());
            },
            ",",
        );
        out.push('}');
        out
    }
}

/// Exposes the names of `inner` under `prefix.`, so `:user.id` reaches `inner`'s `id`.
pub struct PrefixedArguments<F> {
    prefix: String,
    inner: F,
}

impl<F: NamedArgumentFinder> PrefixedArguments<F> {
    pub fn new(prefix: impl Into<String>, inner: F) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }
}

impl<F: NamedArgumentFinder> NamedArgumentFinder for PrefixedArguments<F> {
    fn find(&self, name: &str, context: &StatementContext<'_>) -> Option<Argument> {
        let rest = name.strip_prefix(self.prefix.as_str())?.strip_prefix('.')?;
        self.inner.find(rest, context)
    }
    fn names(&self) -> Vec<String> {
        self.inner
            .names()
            .into_iter()
            .map(|name| format!("{}.{}", self.prefix, name))
            .collect()
    }
    fn describe(&self) -> String {
        format!("{}.{}", self.prefix, self.inner.describe())
    }
}

/// Arguments computed by a closure.
pub struct FnArguments<F>(pub F);

impl<F> NamedArgumentFinder for FnArguments<F>
where
    F: Fn(&str) -> Option<Value>,
{
    fn find(&self, name: &str, _context: &StatementContext<'_>) -> Option<Argument> {
        (self.0)(name).map(Argument::Value)
    }
}

impl<F> fmt::Debug for FnArguments<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnArguments")
    }
}
