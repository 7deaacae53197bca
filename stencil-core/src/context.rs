use crate::{Attributes, ParsedSql};

/// What a [`NamedArgumentFinder`](crate::NamedArgumentFinder) can observe about
/// the statement being bound.
#[derive(Debug, Clone, Copy)]
pub struct StatementContext<'a> {
    /// Template after attribute substitution.
    pub rendered_sql: &'a str,
    pub parsed_sql: &'a ParsedSql,
    pub attributes: &'a Attributes,
}

impl<'a> StatementContext<'a> {
    pub fn new(rendered_sql: &'a str, parsed_sql: &'a ParsedSql, attributes: &'a Attributes) -> Self {
        Self {
            rendered_sql,
            parsed_sql,
            attributes,
        }
    }
}
