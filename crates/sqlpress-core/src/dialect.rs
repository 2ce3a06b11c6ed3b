//! SQL dialect metadata
//!
//! Each supported dialect maps to a `sqlparser` dialect for parsing and to a
//! default identifier wrapping style for rendering. Dialect selection never
//! changes formatting semantics beyond identifier quoting.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    AnsiDialect, Dialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};

use crate::{NameWrapper, SqlpressError};

/// SQL dialect variants understood by the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// SQLite SQL dialect
    Sqlite,
    /// PostgreSQL SQL dialect
    PostgreSql,
    /// MySQL/MariaDB SQL dialect
    MySql,
    /// Generic ANSI SQL (fallback)
    Ansi,
}

impl Default for SqlDialect {
    fn default() -> Self {
        SqlDialect::Sqlite
    }
}

impl SqlDialect {
    /// Get the sqlparser dialect for this SQL variant
    pub fn sqlparser_dialect(&self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
            SqlDialect::PostgreSql => Box::new(PostgreSqlDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::Ansi => Box::new(AnsiDialect {}),
        }
    }

    /// Get display name for this SQL dialect
    pub fn display_name(&self) -> &'static str {
        match self {
            SqlDialect::Sqlite => "SQLite",
            SqlDialect::PostgreSql => "PostgreSQL",
            SqlDialect::MySql => "MySQL",
            SqlDialect::Ansi => "ANSI SQL",
        }
    }

    /// The identifier wrapping style conventionally used by this dialect
    pub fn default_wrapper(&self) -> NameWrapper {
        match self {
            SqlDialect::Sqlite => NameWrapper::DoubleQuote,
            SqlDialect::PostgreSql => NameWrapper::DoubleQuote,
            SqlDialect::MySql => NameWrapper::Backtick,
            SqlDialect::Ansi => NameWrapper::DoubleQuote,
        }
    }
}

impl FromStr for SqlDialect {
    type Err = SqlpressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(SqlDialect::Sqlite),
            "postgres" | "postgresql" => Ok(SqlDialect::PostgreSql),
            "mysql" | "mariadb" => Ok(SqlDialect::MySql),
            "ansi" | "generic" => Ok(SqlDialect::Ansi),
            other => Err(SqlpressError::Configuration(format!(
                "unknown SQL dialect: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_dialect_names() {
        assert_eq!("sqlite".parse::<SqlDialect>().unwrap(), SqlDialect::Sqlite);
        assert_eq!(
            "postgresql".parse::<SqlDialect>().unwrap(),
            SqlDialect::PostgreSql
        );
        assert_eq!("MySQL".parse::<SqlDialect>().unwrap(), SqlDialect::MySql);
        assert!("oracle".parse::<SqlDialect>().is_err());
    }

    #[test]
    fn default_wrapper_matches_dialect_convention() {
        assert_eq!(SqlDialect::Sqlite.default_wrapper(), NameWrapper::DoubleQuote);
        assert_eq!(SqlDialect::MySql.default_wrapper(), NameWrapper::Backtick);
    }
}
