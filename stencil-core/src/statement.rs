use crate::{
    Argument, AsValue, Attributes, Binding, Context, Error, MapArguments, NamedArgumentFinder,
    ParsedSql, Prepared, PrefixedArguments, ResolvedArgument, Result, StatementConfig,
    StatementContext, TypeRegistry, Value, render_template, resolve, separated_by, truncate_long,
};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// Fluent methods shared by [`SqlStatement`] and [`PreparedBatch`](crate::PreparedBatch).
///
/// Implementors only expose their current binding, attributes and configuration.
pub trait BindArguments<'a> {
    fn config(&self) -> &StatementConfig;
    fn binding_mut(&mut self) -> &mut Binding<'a>;
    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Bind the positional parameter at `position` (from 0).
    fn bind(&mut self, position: usize, value: impl AsValue) -> &mut Self {
        self.binding_mut().add_positional(position, value);
        self
    }
    fn bind_named(&mut self, name: impl Into<String>, value: impl AsValue) -> &mut Self {
        self.binding_mut().add_named(name, value);
        self
    }
    fn bind_argument(&mut self, name: impl Into<String>, argument: Argument) -> &mut Self {
        self.binding_mut().add_named(name, argument);
        self
    }
    /// Bind `value` declaring its type as the variant of `ty`.
    fn bind_by_type(&mut self, name: impl Into<String>, value: impl AsValue, ty: Value) -> &mut Self {
        self.bind_argument(name, Argument::typed(value, ty))
    }
    fn bind_null(&mut self, name: impl Into<String>, ty: Value) -> &mut Self {
        self.bind_argument(name, Argument::null(ty))
    }
    /// Bind a value computed when the statement is rendered.
    fn bind_supplier(
        &mut self,
        name: impl Into<String>,
        supplier: impl Fn() -> Result<Value> + Send + Sync + 'static,
    ) -> &mut Self {
        self.bind_argument(name, Argument::supplier(supplier))
    }
    /// Every entry becomes a fallback named argument.
    fn bind_map<K: Into<String>, V: AsValue>(
        &mut self,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self {
        self.binding_mut()
            .add_finder(values.into_iter().collect::<MapArguments>());
        self
    }
    fn bind_finder(&mut self, finder: impl NamedArgumentFinder + 'a) -> &mut Self {
        self.binding_mut().add_finder(finder);
        self
    }
    /// Names resolved by `finder` become reachable as `prefix.name`.
    fn bind_prefixed(
        &mut self,
        prefix: impl Into<String>,
        finder: impl NamedArgumentFinder + 'a,
    ) -> &mut Self {
        self.binding_mut()
            .add_finder(PrefixedArguments::new(prefix, finder));
        self
    }

    /// Bind one named parameter `__key_i` per value and define the attribute
    /// `key` as their comma separated markers, to be used as `in (<key>)`.
    fn bind_list<V: AsValue>(
        &mut self,
        key: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<&mut Self> {
        if !is_list_key(key) {
            let error = Error::msg(format!(
                "bind_list key `{}` cannot form parameter names, use ASCII letters, digits, `_` and single dots",
                key
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        let values: Vec<V> = values.into_iter().collect();
        if values.is_empty() {
            let error = Error::msg(format!("bind_list was called with an empty list for `{}`", key));
            log::error!("{:#}", error);
            return Err(error);
        }
        let parser = self.config().parser();
        let mut markers = String::new();
        separated_by(
            &mut markers,
            0..values.len(),
            |out, i| out.push_str(&parser.name_parameter(&list_parameter(key, i))),
            ",",
        );
        for (i, value) in values.into_iter().enumerate() {
            self.binding_mut().add_named(list_parameter(key, i), value);
        }
        self.attributes_mut().define(key, markers);
        Ok(self)
    }

    fn define(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.attributes_mut().define(key, value);
        self
    }
    /// Define `key` as the values joined by `, `.
    fn define_list<V: Display>(
        &mut self,
        key: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<&mut Self> {
        let values: Vec<V> = values.into_iter().collect();
        if values.is_empty() {
            let error = Error::msg(format!("define_list was called with an empty list for `{}`", key));
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut joined = String::new();
        separated_by(&mut joined, values, |out, v| out.push_str(&v.to_string()), ", ");
        self.attributes_mut().define(key, joined);
        Ok(self)
    }
}

/// `__key_i` must tokenize back as a single name.
fn is_list_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn list_parameter(key: &str, index: usize) -> String {
    format!("__{}_{}", key, index)
}

/// A template being bound, rendered once all its arguments are known.
///
/// ```rust
/// use stencil_core::{BindArguments, StatementConfig, Value};
/// let config = StatementConfig::default();
/// let mut statement = config.create_statement("select * from t where a = :x and b = :x");
/// statement.bind_named("x", 5);
/// let rendered = statement.render().unwrap();
/// assert_eq!(rendered.sql(), "select * from t where a = ? and b = ?");
/// assert_eq!(rendered.arguments().len(), 2);
/// ```
#[derive(Debug)]
pub struct SqlStatement<'a> {
    template: String,
    config: StatementConfig,
    attributes: Attributes,
    binding: Binding<'a>,
}

impl<'a> SqlStatement<'a> {
    pub fn new(config: StatementConfig, template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            attributes: config.attributes().clone(),
            config,
            binding: Binding::new(),
        }
    }
    pub fn template(&self) -> &str {
        &self.template
    }
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    pub fn binding(&self) -> &Binding<'a> {
        &self.binding
    }

    /// Substitute the attributes, parse the result and resolve the binding against it.
    pub fn render(&self) -> Result<RenderedStatement> {
        let rendered = render_template(
            self.config.template_engine(),
            &self.template,
            &self.attributes,
        )?;
        let parsed = self.config.parser().parse(&rendered)?;
        let context = StatementContext::new(&rendered, &parsed, &self.attributes);
        let arguments = resolve(
            &parsed,
            &self.binding,
            &context,
            self.config.allow_unused_bindings(),
        )?;
        Ok(RenderedStatement {
            sql: parsed,
            arguments,
        })
    }
}

impl<'a> BindArguments<'a> for SqlStatement<'a> {
    fn config(&self) -> &StatementConfig {
        &self.config
    }
    fn binding_mut(&mut self) -> &mut Binding<'a> {
        &mut self.binding
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Display for SqlStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {} and attributes {}",
            truncate_long!(self.template),
            self.binding,
            self.attributes
        )
    }
}

/// Rewritten SQL and the argument for each of its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    pub sql: Arc<ParsedSql>,
    pub arguments: Vec<ResolvedArgument>,
}

impl RenderedStatement {
    pub fn sql(&self) -> &str {
        self.sql.sql()
    }
    pub fn parsed(&self) -> &ParsedSql {
        &self.sql
    }
    pub fn arguments(&self) -> &[ResolvedArgument] {
        &self.arguments
    }
    /// The bare values, in placeholder order.
    pub fn values(&self) -> Vec<Value> {
        self.arguments.iter().map(|v| v.value.clone()).collect()
    }

    /// Write each argument at its slot, converted by `registry`.
    pub fn bind_to<P: Prepared>(&self, prepared: &mut P, registry: &TypeRegistry) -> Result<()> {
        bind_arguments(&self.sql, &self.arguments, prepared, registry)
    }
}

pub(crate) fn bind_arguments<P: Prepared>(
    sql: &ParsedSql,
    arguments: &[ResolvedArgument],
    prepared: &mut P,
    registry: &TypeRegistry,
) -> Result<()> {
    for (i, argument) in arguments.iter().enumerate() {
        let value = registry
            .prepare(argument)
            .with_context(|| {
                format!(
                    "Cannot bind the argument at position {} of query:\n{}",
                    i,
                    truncate_long!(sql.sql())
                )
            })
            .inspect_err(|error| log::error!("{:#}", error))?;
        prepared.bind_index(value, i as u64)?;
    }
    Ok(())
}

impl Display for RenderedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql.sql())?;
        f.write_str(" [")?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument.value)?;
        }
        f.write_str("]")
    }
}
