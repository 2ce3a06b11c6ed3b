//! Formatter dispatch
//!
//! Resolves an AST node to the one statement formatter responsible for it.
//! The supported node kinds form a closed set; an unrecognized statement kind
//! is an authorship gap in the statement formatters, reported as a diagnostic
//! and skipped, never a fatal condition.

use sqlparser::ast::{Cte, Expr, Query, Select, Statement, With};
use sqlpress_core::{NameWrapper, SqlDialect};

use crate::stmt::{CteFormatter, ExprFormatter, QueryFormatter, SelectFormatter, WithFormatter};
use crate::stream::TokenStream;

/// Dialect and wrapping policy propagated into every resolved formatter
#[derive(Debug, Clone, Copy)]
pub struct FormatEnv {
    pub dialect: SqlDialect,
    pub wrapper: NameWrapper,
}

impl FormatEnv {
    pub fn new(dialect: SqlDialect) -> Self {
        FormatEnv {
            dialect,
            wrapper: dialect.default_wrapper(),
        }
    }

    pub fn with_wrapper(mut self, wrapper: NameWrapper) -> Self {
        self.wrapper = wrapper;
        self
    }
}

impl Default for FormatEnv {
    fn default() -> Self {
        FormatEnv::new(SqlDialect::default())
    }
}

/// Closed set of AST node kinds the engine can format
#[derive(Debug, Clone, Copy)]
pub enum AstNode<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    Select(&'a Select),
    Expr(&'a Expr),
    With(&'a With),
    Cte(&'a Cte),
}

/// A statement-specific formatter: appends its node's tokens to a stream
pub trait NodeFormatter {
    fn build(&self, stream: &mut TokenStream);
}

/// Resolve `node` to its formatter. `None` input yields `None` silently; a
/// statement kind without a formatter yields `None` with a diagnostic.
pub fn formatter_for<'a>(
    node: Option<AstNode<'a>>,
    env: FormatEnv,
) -> Option<Box<dyn NodeFormatter + 'a>> {
    let node = node?;
    match node {
        AstNode::Statement(stmt) => match stmt {
            Statement::Query(query) => Some(Box::new(QueryFormatter::new(query, env))),
            other => {
                tracing::warn!(
                    statement = statement_kind(other),
                    "no formatter registered for statement kind"
                );
                None
            }
        },
        AstNode::Query(query) => Some(Box::new(QueryFormatter::new(query, env))),
        AstNode::Select(select) => Some(Box::new(SelectFormatter::new(select, env))),
        AstNode::Expr(expr) => Some(Box::new(ExprFormatter::new(expr, env))),
        AstNode::With(with) => Some(Box::new(WithFormatter::new(with, env))),
        AstNode::Cte(cte) => Some(Box::new(CteFormatter::new(cte, env))),
    }
}

/// Human-readable statement kind for diagnostics
fn statement_kind(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Insert(_) => "INSERT",
        Statement::Update { .. } => "UPDATE",
        Statement::Delete(_) => "DELETE",
        Statement::CreateTable(_) => "CREATE TABLE",
        Statement::CreateView { .. } => "CREATE VIEW",
        Statement::CreateIndex(_) => "CREATE INDEX",
        Statement::AlterTable { .. } => "ALTER TABLE",
        Statement::Drop { .. } => "DROP",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::parser::Parser;

    fn parse_one(sql: &str) -> Statement {
        let dialect = SqlDialect::Sqlite.sqlparser_dialect();
        Parser::parse_sql(dialect.as_ref(), sql)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn null_node_yields_no_formatter_silently() {
        assert!(formatter_for(None, FormatEnv::default()).is_none());
    }

    #[test]
    fn query_statement_resolves() {
        let stmt = parse_one("SELECT 1");
        assert!(formatter_for(Some(AstNode::Statement(&stmt)), FormatEnv::default()).is_some());
    }

    #[test]
    fn unsupported_statement_kind_yields_none() {
        let stmt = parse_one("DROP TABLE t");
        assert!(formatter_for(Some(AstNode::Statement(&stmt)), FormatEnv::default()).is_none());
    }
}
