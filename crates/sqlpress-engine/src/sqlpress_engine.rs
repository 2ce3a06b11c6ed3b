//! sqlpress engine - token-stream SQL formatting
//!
//! The engine works in two phases. Statement formatters append typed tokens
//! to a [`TokenStream`] in AST-traversal order; the finished stream is then
//! rendered in a single forward pass by the detokenizer, which resolves
//! spacing, keyword case, indentation, and keyword alignment against an
//! immutable [`FormatterConfig`] snapshot.
//!
//! # Quick Start
//!
//! ```
//! use sqlpress_engine::{format_sql, FormatterConfig, SqlFormatter};
//!
//! // Simple formatting with defaults
//! let formatted = format_sql("select id, name from users where id = 1").unwrap();
//! assert!(formatted.contains("SELECT"));
//!
//! // Custom configuration
//! let config = FormatterConfig::default()
//!     .with_indent_size(2)
//!     .with_uppercase_keywords(false);
//! let formatter = SqlFormatter::new(config);
//! let formatted = formatter.format("select * from users").unwrap();
//! assert!(formatted.contains("select"));
//! ```

pub mod config;
pub mod dispatch;
mod format;
mod render;
mod stmt;
mod stream;
mod token;

#[cfg(test)]
mod tests;

pub use config::FormatterConfig;
pub use dispatch::{AstNode, FormatEnv, NodeFormatter, formatter_for};
pub use format::{FormatError, SqlFormatter, format_sql, format_sql_with_config};
pub use render::detokenize;
pub use stream::{ListSep, Literal, TokenStream};
pub use token::{Token, TokenKind};
