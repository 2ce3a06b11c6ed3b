//! Error types for sqlpress

use thiserror::Error;

/// Core error type for sqlpress operations
#[derive(Error, Debug)]
pub enum SqlpressError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for sqlpress operations
pub type Result<T> = std::result::Result<T, SqlpressError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn configuration_error_names_the_offending_value() {
        let err = "oracle".parse::<crate::SqlDialect>().unwrap_err();
        assert!(matches!(err, SqlpressError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown SQL dialect: oracle"
        );
    }
}
