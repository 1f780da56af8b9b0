//! Configuration management utilities

use crate::error::{Result, UtilsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_filter: String,
    /// Log line format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "livest".to_string(),
            environment: "development".to_string(),
            log_filter: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Parse a config from a JSON document. Missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| UtilsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(UtilsError::Invalid("app_name must not be empty".to_string()));
        }
        if self.log_filter.trim().is_empty() {
            return Err(UtilsError::Invalid("log_filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
            || self.environment.eq_ignore_ascii_case("prod")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "livest");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"environment": "prod", "log_format": "json"}"#).unwrap();
        assert_eq!(config.app_name, "livest");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_empty_filter_rejected() {
        let result = Config::from_json(r#"{"log_filter": "  "}"#);
        assert!(matches!(result, Err(UtilsError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Config::from_json("{not json"), Err(UtilsError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/definitely/not/here/livest.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
