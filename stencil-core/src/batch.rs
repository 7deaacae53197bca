use crate::{
    AsValue, Attributes, BindArguments, Binding, Context, Error, ParsedSql, Prepared,
    ResolvedArgument, Result, StatementConfig, StatementContext, TypeRegistry, render_template,
    resolve, statement::bind_arguments,
};
use std::{mem, sync::Arc};

/// One template executed with many rows of arguments.
///
/// Binding methods fill the current row, [`add`](Self::add) moves it into the
/// batch and starts a fresh one. Attributes are shared by every row, so the
/// template is rendered and parsed once.
pub struct PreparedBatch<'a> {
    template: String,
    config: StatementConfig,
    attributes: Attributes,
    current: Binding<'a>,
    rows: Vec<Binding<'a>>,
}

impl<'a> PreparedBatch<'a> {
    pub fn new(config: StatementConfig, template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            attributes: config.attributes().clone(),
            config,
            current: Binding::new(),
            rows: Vec::new(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Close the current row.
    pub fn add(&mut self) -> Result<&mut Self> {
        if self.current.is_empty() {
            let error = Error::msg(format!(
                "Attempt to add() an empty row to the batch of:\n{}",
                crate::truncate_long!(self.template)
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        self.rows.push(mem::take(&mut self.current));
        Ok(self)
    }

    /// Bind `values` by position into the current row, then close it.
    pub fn add_positional_row<V: AsValue>(
        &mut self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<&mut Self> {
        for (i, value) in values.into_iter().enumerate() {
            self.current.add_positional(i, value);
        }
        self.add()
    }

    /// Bind `values` by name into the current row, then close it.
    pub fn add_named_row<K: Into<String>, V: AsValue>(
        &mut self,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&mut Self> {
        for (name, value) in values {
            self.current.add_named(name, value);
        }
        self.add()
    }

    /// Number of rows added so far, the current row excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> Result<RenderedBatch> {
        let rendered = render_template(
            self.config.template_engine(),
            &self.template,
            &self.attributes,
        )?;
        let parsed = self.config.parser().parse(&rendered)?;
        if !self.current.is_empty() {
            log::warn!(
                "Batch rendered with a row not added yet, it is ignored:\n{}",
                crate::truncate_long!(rendered)
            );
        }
        let context = StatementContext::new(&rendered, &parsed, &self.attributes);
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                resolve(&parsed, row, &context, self.config.allow_unused_bindings())
                    .with_context(|| format!("Cannot resolve row {} of the batch", i))
            })
            .collect::<Result<_>>()?;
        Ok(RenderedBatch { sql: parsed, rows })
    }
}

impl<'a> BindArguments<'a> for PreparedBatch<'a> {
    fn config(&self) -> &StatementConfig {
        &self.config
    }
    fn binding_mut(&mut self) -> &mut Binding<'a> {
        &mut self.current
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

/// Rewritten SQL and one argument list per row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBatch {
    pub sql: Arc<ParsedSql>,
    pub rows: Vec<Vec<ResolvedArgument>>,
}

impl RenderedBatch {
    pub fn sql(&self) -> &str {
        self.sql.sql()
    }
    pub fn rows(&self) -> &[Vec<ResolvedArgument>] {
        &self.rows
    }

    /// Write the arguments of `row` into `prepared`, replacing previous bindings.
    pub fn bind_row_to<P: Prepared>(
        &self,
        row: usize,
        prepared: &mut P,
        registry: &TypeRegistry,
    ) -> Result<()> {
        let Some(arguments) = self.rows.get(row) else {
            return Err(Error::msg(format!(
                "Row {} is out of range, the batch has {} rows",
                row,
                self.rows.len()
            )));
        };
        prepared.clear_bindings()?;
        bind_arguments(&self.sql, arguments, prepared, registry)
            .with_context(|| format!("While binding row {} of the batch", row))
    }
}
