//! Error types for livest-utils

use thiserror::Error;

/// Result type alias for livest-utils
pub type Result<T> = std::result::Result<T, UtilsError>;

/// Errors raised while loading shared configuration
#[derive(Error, Debug)]
pub enum UtilsError {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// Config parsed but holds unusable values
    #[error("Configuration error: {0}")]
    Invalid(String),
}
