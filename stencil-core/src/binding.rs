use crate::{AsValue, NamedArgumentFinder, Result, Value};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Debug, Display},
};

/// A value waiting to be bound.
pub enum Argument {
    /// Value whose type is inferred from its variant.
    Value(Value),
    /// Value bound together with an explicit type descriptor.
    Typed { value: Value, ty: Value },
    /// Value computed at resolution time, once per statement rendering.
    Supplier(Box<dyn Fn() -> Result<Value> + Send + Sync>),
}

impl Argument {
    pub fn typed(value: impl AsValue, ty: Value) -> Self {
        Argument::Typed {
            value: value.as_value(),
            ty: ty.as_null(),
        }
    }
    pub fn supplier(f: impl Fn() -> Result<Value> + Send + Sync + 'static) -> Self {
        Argument::Supplier(Box::new(f))
    }
    /// Null carrying the type `ty`.
    pub fn null(ty: Value) -> Self {
        Argument::Typed {
            value: ty.as_null(),
            ty: ty.as_null(),
        }
    }
}

impl<T: AsValue> From<T> for Argument {
    fn from(value: T) -> Self {
        Argument::Value(value.as_value())
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Value(value) => Display::fmt(value, f),
            Argument::Typed { value, ty } => write!(f, "{}::{}", value, ty.type_name()),
            Argument::Supplier(..) => f.write_str("<supplier>"),
        }
    }
}

impl Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Argument::Typed { value, ty } => f
                .debug_struct("Typed")
                .field("value", value)
                .field("ty", ty)
                .finish(),
            Argument::Supplier(..) => f.write_str("Supplier"),
        }
    }
}

/// Arguments accumulated for one execution of a statement.
///
/// Positional arguments are keyed by their 0 based slot, named ones by name.
/// Finders are consulted, in registration order, for names without a direct
/// binding.
#[derive(Default)]
pub struct Binding<'a> {
    positional: BTreeMap<usize, Argument>,
    named: BTreeMap<String, Argument>,
    finders: Vec<Box<dyn NamedArgumentFinder + 'a>>,
}

impl<'a> Binding<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the slot `position`, replacing any previous argument there.
    pub fn add_positional(&mut self, position: usize, argument: impl Into<Argument>) -> &mut Self {
        let argument = argument.into();
        if let Some(previous) = self.positional.insert(position, argument) {
            log::debug!(
                "Positional argument {} rebound, discarding {}",
                position,
                previous
            );
        }
        self
    }

    /// Bind `name`, replacing any previous argument with the same name.
    pub fn add_named(&mut self, name: impl Into<String>, argument: impl Into<Argument>) -> &mut Self {
        let name = name.into();
        let argument = argument.into();
        if let Some(previous) = self.named.get(&name) {
            log::debug!("Named argument `{}` rebound, discarding {}", name, previous);
        }
        self.named.insert(name, argument);
        self
    }

    pub fn add_finder(&mut self, finder: impl NamedArgumentFinder + 'a) -> &mut Self {
        self.finders.push(Box::new(finder));
        self
    }

    pub fn get_positional(&self, position: usize) -> Option<&Argument> {
        self.positional.get(&position)
    }
    pub fn get_named(&self, name: &str) -> Option<&Argument> {
        self.named.get(name)
    }
    pub fn positional(&self) -> &BTreeMap<usize, Argument> {
        &self.positional
    }
    pub fn named(&self) -> &BTreeMap<String, Argument> {
        &self.named
    }
    pub fn finders(&self) -> impl Iterator<Item = &(dyn NamedArgumentFinder + 'a)> {
        self.finders.iter().map(|v| v.as_ref())
    }

    /// Every name bound directly or advertised by a finder.
    pub fn names(&self) -> BTreeSet<String> {
        self.named
            .keys()
            .cloned()
            .chain(self.finders.iter().flat_map(|f| f.names()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty() && self.finders.is_empty()
    }

    pub fn clear(&mut self) {
        self.positional.clear();
        self.named.clear();
        self.finders.clear();
    }
}

impl Display for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{positional:{")?;
        for (i, (k, v)) in self.positional.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", k, v)?;
        }
        f.write_str("}, named:{")?;
        for (i, (k, v)) in self.named.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", k, v)?;
        }
        f.write_str("}, finder:[")?;
        for (i, finder) in self.finders.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&finder.describe())?;
        }
        f.write_str("]}")
    }
}

impl Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
