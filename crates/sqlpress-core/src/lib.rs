//! sqlpress core - shared types for the SQL pretty-printer
//!
//! This crate provides the types every other sqlpress crate depends on:
//!
//! - `SqlDialect` - the target SQL variant and its parser/quoting rules
//! - `NameWrapper` - identifier quoting/escaping policy
//! - `SqlpressError` / `Result` - common error type

mod dialect;
mod error;
mod wrap;

pub use dialect::*;
pub use error::*;
pub use wrap::*;
