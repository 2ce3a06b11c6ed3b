//! SQL formatter configuration
//!
//! Every rendering decision the detokenizer makes is driven by one of these
//! switches. The configuration is an immutable snapshot for the duration of a
//! build + render cycle; it is read, never reinterpreted.
//!
//! # Example
//!
//! ```
//! use sqlpress_engine::FormatterConfig;
//!
//! let config = FormatterConfig::default()
//!     .with_indent_size(2)
//!     .with_uppercase_keywords(false)
//!     .with_lines_between_queries(2);
//!
//! assert_eq!(config.indent_size, 2);
//! assert!(!config.uppercase_keywords);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for SQL formatting
///
/// All fields deserialize with their defaults, so a partial TOML/JSON config
/// only needs to name the switches it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Whether to render keywords uppercase (`SELECT`) or lowercase (`select`)
    pub uppercase_keywords: bool,
    /// Columns added per indent step
    pub indent_size: usize,
    /// Blank lines between statements of a multi-statement script
    pub lines_between_queries: usize,

    /// Space before binary/unary operators
    pub space_before_operator: bool,
    /// Space after binary/unary operators
    pub space_after_operator: bool,
    /// Space before the dot of a qualified name
    pub space_before_dot: bool,
    /// Space after the dot of a qualified name
    pub space_after_dot: bool,
    /// Space before a list-separator comma
    pub space_before_comma_in_list: bool,
    /// Space after a list-separator comma
    pub space_after_comma_in_list: bool,

    /// Space before any opening parenthesis
    pub space_before_open_par: bool,
    /// Space after any opening parenthesis
    pub space_after_open_par: bool,
    /// Space before any closing parenthesis
    pub space_before_close_par: bool,
    /// Space after any closing parenthesis
    pub space_after_close_par: bool,

    /// Line break before an opening statement-definition parenthesis
    pub nl_before_open_par_def: bool,
    /// Line break after an opening statement-definition parenthesis
    pub nl_after_open_par_def: bool,
    /// Line break before a closing statement-definition parenthesis
    pub nl_before_close_par_def: bool,
    /// Line break after a closing statement-definition parenthesis
    pub nl_after_close_par_def: bool,
    /// Line break before an opening expression/function parenthesis
    pub nl_before_open_par_expr: bool,
    /// Line break after an opening expression/function parenthesis
    pub nl_after_open_par_expr: bool,
    /// Line break before a closing expression/function parenthesis
    pub nl_before_close_par_expr: bool,
    /// Line break after a closing expression/function parenthesis
    pub nl_after_close_par_expr: bool,

    /// Line break after a semicolon (wins over the trailing space)
    pub nl_after_semicolon: bool,
    /// Line break after a list-separator comma (wins over the trailing space)
    pub nl_after_comma: bool,
    /// Line break after an expression comma (wins over the trailing space)
    pub nl_after_comma_in_expr: bool,

    /// Suppress the default pre-semicolon space
    pub never_space_before_semicolon: bool,
    /// Suppress the space between a function name and its opening parenthesis
    pub no_space_after_function_name: bool,
    /// Quote/escape every identifier, not just the ones requiring it
    pub always_wrap_names: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            uppercase_keywords: true,
            indent_size: 4,
            lines_between_queries: 1,
            space_before_operator: true,
            space_after_operator: true,
            space_before_dot: false,
            space_after_dot: false,
            space_before_comma_in_list: false,
            space_after_comma_in_list: true,
            space_before_open_par: true,
            space_after_open_par: false,
            space_before_close_par: false,
            space_after_close_par: true,
            nl_before_open_par_def: false,
            nl_after_open_par_def: true,
            nl_before_close_par_def: true,
            nl_after_close_par_def: false,
            nl_before_open_par_expr: false,
            nl_after_open_par_expr: false,
            nl_before_close_par_expr: false,
            nl_after_close_par_expr: false,
            nl_after_semicolon: true,
            nl_after_comma: false,
            nl_after_comma_in_expr: false,
            never_space_before_semicolon: true,
            no_space_after_function_name: true,
            always_wrap_names: false,
        }
    }
}

impl FormatterConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of columns per step)
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Sets whether to uppercase SQL keywords
    pub fn with_uppercase_keywords(mut self, uppercase: bool) -> Self {
        self.uppercase_keywords = uppercase;
        self
    }

    /// Sets the number of blank lines between queries
    pub fn with_lines_between_queries(mut self, lines: usize) -> Self {
        self.lines_between_queries = lines;
        self
    }

    /// Sets whether every identifier is quoted unconditionally
    pub fn with_always_wrap_names(mut self, always: bool) -> Self {
        self.always_wrap_names = always;
        self
    }

    /// Compact preset: minimal line breaking, two-column indent
    pub fn compact() -> Self {
        Self {
            indent_size: 2,
            nl_after_open_par_def: false,
            nl_before_close_par_def: false,
            lines_between_queries: 0,
            ..Self::default()
        }
    }

    /// Expanded preset: one list element per line, broken-out parentheses
    pub fn expanded() -> Self {
        Self {
            nl_after_comma: true,
            nl_after_open_par_expr: true,
            nl_before_close_par_expr: true,
            lines_between_queries: 2,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = FormatterConfig::default();
        assert!(config.uppercase_keywords);
        assert_eq!(config.indent_size, 4);
        assert_eq!(config.lines_between_queries, 1);
        assert!(config.never_space_before_semicolon);
        assert!(config.no_space_after_function_name);
        assert!(!config.always_wrap_names);
    }

    #[test]
    fn builder_chaining() {
        let config = FormatterConfig::new()
            .with_indent_size(8)
            .with_uppercase_keywords(false)
            .with_lines_between_queries(2);
        assert_eq!(config.indent_size, 8);
        assert!(!config.uppercase_keywords);
        assert_eq!(config.lines_between_queries, 2);
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: FormatterConfig =
            serde_json::from_str(r#"{"indent_size": 2, "uppercase_keywords": false}"#).unwrap();
        assert_eq!(config.indent_size, 2);
        assert!(!config.uppercase_keywords);
        // untouched fields keep their defaults
        assert!(config.nl_after_semicolon);
        assert!(config.space_after_comma_in_list);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = FormatterConfig::expanded();
        let json = serde_json::to_string(&config).unwrap();
        let back: FormatterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
