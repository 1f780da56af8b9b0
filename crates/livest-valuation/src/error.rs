//! Error types for valuation operations

use thiserror::Error;

/// Valuation specific errors
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Caller supplied a value the engine cannot work with
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Configuration or reference data error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// REPL command could not be parsed
    #[error("Command error: {0}")]
    CommandError(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ValuationError {
    /// Shorthand for [`ValuationError::InvalidInput`]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for valuation operations
pub type Result<T> = std::result::Result<T, ValuationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValuationError::invalid("sqft", "area must be positive");
        assert_eq!(err.to_string(), "Invalid input for sqft: area must be positive");

        let err = ValuationError::ConfigError("locality table is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: locality table is empty");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ValuationError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
