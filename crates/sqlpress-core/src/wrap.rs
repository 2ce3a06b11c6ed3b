//! Identifier wrapping policy
//!
//! Object names are quoted either always (configuration switch) or only when
//! required: reserved words, names starting with a digit, or names containing
//! characters outside `[A-Za-z0-9_]`.
//!
//! The reserved-word table is deliberately the SQLite one rather than the
//! parser's full ANSI list; the parser reserves many plain function names
//! (COUNT, SUM) that no dialect requires quoting for.

use serde::{Deserialize, Serialize};

/// Reserved words that cannot stand bare as object names
const RESERVED_WORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Identifier quoting/escaping style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameWrapper {
    /// `"name"` - standard SQL, SQLite, PostgreSQL
    DoubleQuote,
    /// `[name]` - SQL Server style, accepted by SQLite
    Bracket,
    /// `` `name` `` - MySQL style, accepted by SQLite
    Backtick,
}

impl Default for NameWrapper {
    fn default() -> Self {
        NameWrapper::DoubleQuote
    }
}

impl NameWrapper {
    /// Wrap `name` unconditionally, doubling any embedded closing character
    pub fn wrap(&self, name: &str) -> String {
        match self {
            NameWrapper::DoubleQuote => format!("\"{}\"", name.replace('"', "\"\"")),
            NameWrapper::Bracket => format!("[{}]", name.replace(']', "]]")),
            NameWrapper::Backtick => format!("`{}`", name.replace('`', "``")),
        }
    }

    /// Wrap `name` only if it cannot stand bare in SQL text
    pub fn wrap_if_needed(&self, name: &str) -> String {
        if needs_wrapping(name) {
            self.wrap(name)
        } else {
            name.to_string()
        }
    }
}

/// Whether `name` must be quoted to be a valid object reference
pub fn needs_wrapping(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return true;
    }
    is_reserved_word(name)
}

/// Reserved-word check, case-insensitive
pub fn is_reserved_word(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    RESERVED_WORDS.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_names_stay_bare() {
        assert_eq!(NameWrapper::DoubleQuote.wrap_if_needed("users"), "users");
        assert_eq!(NameWrapper::Backtick.wrap_if_needed("order_id"), "order_id");
    }

    #[test]
    fn function_names_are_not_reserved() {
        assert!(!is_reserved_word("count"));
        assert!(!is_reserved_word("sum"));
        assert!(!is_reserved_word("coalesce"));
    }

    #[test]
    fn reserved_words_get_wrapped() {
        assert_eq!(NameWrapper::DoubleQuote.wrap_if_needed("select"), "\"select\"");
        assert_eq!(NameWrapper::Bracket.wrap_if_needed("order"), "[order]");
    }

    #[test]
    fn odd_characters_force_wrapping() {
        assert_eq!(
            NameWrapper::DoubleQuote.wrap_if_needed("first name"),
            "\"first name\""
        );
        assert_eq!(NameWrapper::DoubleQuote.wrap_if_needed("1st"), "\"1st\"");
        assert_eq!(NameWrapper::DoubleQuote.wrap_if_needed(""), "\"\"");
    }

    #[test]
    fn embedded_quote_characters_are_doubled() {
        assert_eq!(NameWrapper::DoubleQuote.wrap("a\"b"), "\"a\"\"b\"");
        assert_eq!(NameWrapper::Bracket.wrap("a]b"), "[a]]b]");
        assert_eq!(NameWrapper::Backtick.wrap("a`b"), "`a``b`");
    }
}
