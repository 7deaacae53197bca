use crate::{
    Attributes, DefinedAttributeEngine, PreparedBatch, PrefixSqlParser, SqlParser, SqlStatement,
    TemplateEngine, TypeRegistry,
};
use std::{fmt, sync::Arc};

/// Settings shared by the statements created from it.
///
/// Cloning is cheap: the engine, parser and registry are reference counted, so a
/// clone keeps using the same parse cache.
///
/// ```rust
/// use stencil_core::{BindArguments, StatementConfig};
/// let mut config = StatementConfig::default();
/// config.define("schema", "public");
/// let mut statement = config.create_statement("select * from <schema>.users where id = :id");
/// statement.bind_named("id", 7);
/// let rendered = statement.render().unwrap();
/// assert_eq!(rendered.sql(), "select * from public.users where id = ?");
/// ```
#[derive(Clone)]
pub struct StatementConfig {
    attributes: Attributes,
    template_engine: Arc<dyn TemplateEngine>,
    parser: Arc<dyn SqlParser>,
    registry: Arc<TypeRegistry>,
    allow_unused_bindings: bool,
}

impl StatementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define an attribute seeded into every statement.
    pub fn define(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.attributes.define(key, value);
        self
    }
    pub fn define_map<K: Into<String>, V: ToString>(
        &mut self,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self {
        self.attributes.extend(values);
        self
    }

    pub fn with_template_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.template_engine = Arc::new(engine);
        self
    }
    pub fn with_parser(mut self, parser: impl SqlParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }
    /// Accept bound arguments the template does not declare.
    pub fn with_unused_bindings_allowed(mut self, allowed: bool) -> Self {
        self.allow_unused_bindings = allowed;
        self
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    pub fn template_engine(&self) -> &dyn TemplateEngine {
        self.template_engine.as_ref()
    }
    pub fn parser(&self) -> &dyn SqlParser {
        self.parser.as_ref()
    }
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
    pub fn allow_unused_bindings(&self) -> bool {
        self.allow_unused_bindings
    }

    pub fn create_statement<'a>(&self, template: impl Into<String>) -> SqlStatement<'a> {
        SqlStatement::new(self.clone(), template)
    }
    pub fn create_batch<'a>(&self, template: impl Into<String>) -> PreparedBatch<'a> {
        PreparedBatch::new(self.clone(), template)
    }
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            attributes: Attributes::new(),
            template_engine: Arc::new(DefinedAttributeEngine),
            parser: Arc::new(PrefixSqlParser::colon()),
            registry: Arc::new(TypeRegistry::new()),
            allow_unused_bindings: false,
        }
    }
}

impl fmt::Debug for StatementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementConfig")
            .field("attributes", &self.attributes)
            .field("registry", &self.registry)
            .field("allow_unused_bindings", &self.allow_unused_bindings)
            .finish_non_exhaustive()
    }
}
