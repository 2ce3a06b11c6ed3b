//! Formatting facade
//!
//! [`SqlFormatter`] is the entry point callers use: it parses SQL text for
//! the configured dialect, runs each statement through its formatter, and
//! joins the rendered statements with the configured blank-line gap.
//!
//! A statement kind without a registered formatter is passed through as the
//! parser's own rendering. Input that does not parse is an error; a formatter
//! must never emit a half-formatted guess at broken SQL.

use sqlparser::ast::Statement;
use sqlparser::parser::Parser;
use sqlpress_core::{NameWrapper, SqlDialect};
use thiserror::Error;

use crate::config::FormatterConfig;
use crate::dispatch::{AstNode, FormatEnv, formatter_for};
use crate::render::detokenize;
use crate::stream::TokenStream;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no SQL to format")]
    EmptyInput,
    #[error("invalid SQL: {0}")]
    InvalidSyntax(String),
}

/// Configured SQL pretty-printer
#[derive(Debug, Clone, Default)]
pub struct SqlFormatter {
    config: FormatterConfig,
    dialect: SqlDialect,
    wrapper: Option<NameWrapper>,
}

impl SqlFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        SqlFormatter {
            config,
            dialect: SqlDialect::default(),
            wrapper: None,
        }
    }

    /// Parse and quote identifiers for `dialect`. Resets any explicit wrapper
    /// back to the dialect's default.
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self.wrapper = None;
        self
    }

    /// Override the identifier quoting style
    pub fn with_wrapper(mut self, wrapper: NameWrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn wrapper(&self) -> NameWrapper {
        match self.wrapper {
            Some(wrapper) => wrapper,
            None => self.dialect.default_wrapper(),
        }
    }

    /// Check that `sql` parses under the configured dialect
    pub fn validate(&self, sql: &str) -> Result<(), FormatError> {
        self.parse(sql)?;
        Ok(())
    }

    /// Format one or more statements, each terminated with a semicolon,
    /// separated by the configured blank-line gap, ending in one newline
    pub fn format(&self, sql: &str) -> Result<String, FormatError> {
        let statements = self.parse(sql)?;
        let rendered: Vec<String> = statements
            .iter()
            .map(|stmt| self.format_statement(stmt))
            .collect();
        let gap = "\n".repeat(self.config.lines_between_queries + 1);
        let mut out = rendered.join(&gap);
        out.push('\n');
        Ok(out)
    }

    /// Format a single already-parsed statement, without a trailing newline
    pub fn format_statement(&self, statement: &Statement) -> String {
        let env = FormatEnv::new(self.dialect).with_wrapper(self.wrapper());
        match formatter_for(Some(AstNode::Statement(statement)), env) {
            Some(formatter) => {
                let mut stream = TokenStream::new();
                formatter.build(&mut stream);
                stream.semicolon();
                detokenize(&stream, &self.config, self.wrapper())
                    .trim_end()
                    .to_string()
            }
            // pass-through keeps unsupported statements intact
            None => format!("{statement};"),
        }
    }

    fn parse(&self, sql: &str) -> Result<Vec<Statement>, FormatError> {
        let trimmed = sql.trim();
        if trimmed.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let dialect = self.dialect.sqlparser_dialect();
        let statements = Parser::parse_sql(dialect.as_ref(), trimmed)
            .map_err(|err| FormatError::InvalidSyntax(err.to_string()))?;
        if statements.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        Ok(statements)
    }
}

/// Format with the default style and dialect
pub fn format_sql(sql: &str) -> Result<String, FormatError> {
    SqlFormatter::default().format(sql)
}

/// Format with an explicit style configuration
pub fn format_sql_with_config(sql: &str, config: FormatterConfig) -> Result<String, FormatError> {
    SqlFormatter::new(config).format(sql)
}
