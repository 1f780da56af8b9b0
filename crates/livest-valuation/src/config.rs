//! Configuration for valuation operations

use crate::error::{Result, ValuationError};
use crate::loan::MAX_TENURE_YEARS;
use crate::locality::INFLATION_FACTOR_2026;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`ValuationConfig::inflation_factor`]
pub const ENV_INFLATION_FACTOR: &str = "LIVEST_INFLATION_FACTOR";
/// Environment variable overriding [`ValuationConfig::latency_ms`]
pub const ENV_LATENCY_MS: &str = "LIVEST_LATENCY_MS";
/// Environment variable overriding [`ValuationConfig::lead_latency_ms`]
pub const ENV_LEAD_LATENCY_MS: &str = "LIVEST_LEAD_LATENCY_MS";
/// Environment variable overriding [`ValuationConfig::loan_rate_percent`]
pub const ENV_LOAN_RATE: &str = "LIVEST_LOAN_RATE";
/// Environment variable overriding [`ValuationConfig::loan_tenure_years`]
pub const ENV_LOAN_TENURE: &str = "LIVEST_LOAN_TENURE";

/// Configuration for valuation operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Forward-looking adjustment applied to every base rate
    pub inflation_factor: f64,

    /// Artificial latency before an estimate resolves, in milliseconds
    pub latency_ms: u64,

    /// Artificial latency before a lead inquiry is acknowledged, in milliseconds
    pub lead_latency_ms: u64,

    /// Default annual interest rate for the loan estimator, in percent
    pub loan_rate_percent: f64,

    /// Default loan tenure in years
    pub loan_tenure_years: u32,

    /// Loan principal used when there is no valuation to borrow against
    pub fallback_principal: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            inflation_factor: INFLATION_FACTOR_2026,
            latency_ms: 2000,
            lead_latency_ms: 1500,
            loan_rate_percent: 8.5,
            loan_tenure_years: 20,
            fallback_principal: 10_000_000.0, // 1 crore
        }
    }
}

impl ValuationConfig {
    /// Create a new configuration builder
    pub fn builder() -> ValuationConfigBuilder {
        ValuationConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LIVEST_*` environment overrides
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_INFLATION_FACTOR) {
            self.inflation_factor = parse_override(ENV_INFLATION_FACTOR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LATENCY_MS) {
            self.latency_ms = parse_override(ENV_LATENCY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LEAD_LATENCY_MS) {
            self.lead_latency_ms = parse_override(ENV_LEAD_LATENCY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOAN_RATE) {
            self.loan_rate_percent = parse_override(ENV_LOAN_RATE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOAN_TENURE) {
            self.loan_tenure_years = parse_override(ENV_LOAN_TENURE, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.inflation_factor.is_finite() || self.inflation_factor <= 0.0 {
            return Err(ValuationError::ConfigError(
                "inflation_factor must be a positive number".to_string(),
            ));
        }

        if !self.loan_rate_percent.is_finite() || self.loan_rate_percent < 0.0 {
            return Err(ValuationError::ConfigError(
                "loan_rate_percent must not be negative".to_string(),
            ));
        }

        if self.loan_tenure_years == 0 || self.loan_tenure_years > MAX_TENURE_YEARS {
            return Err(ValuationError::ConfigError(format!(
                "loan_tenure_years must be between 1 and {MAX_TENURE_YEARS}"
            )));
        }

        if !self.fallback_principal.is_finite() || self.fallback_principal <= 0.0 {
            return Err(ValuationError::ConfigError(
                "fallback_principal must be a positive number".to_string(),
            ));
        }

        Ok(())
    }

    /// Estimate latency as a [`Duration`]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Lead acknowledgement latency as a [`Duration`]
    pub fn lead_latency(&self) -> Duration {
        Duration::from_millis(self.lead_latency_ms)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ValuationError::ConfigError(format!("{key} has an unparsable value: {raw}")))
}

/// Builder for ValuationConfig
#[derive(Debug, Default)]
pub struct ValuationConfigBuilder {
    inflation_factor: Option<f64>,
    latency: Option<Duration>,
    lead_latency: Option<Duration>,
    loan_rate_percent: Option<f64>,
    loan_tenure_years: Option<u32>,
    fallback_principal: Option<f64>,
}

impl ValuationConfigBuilder {
    /// Set the inflation factor
    pub fn inflation_factor(mut self, factor: f64) -> Self {
        self.inflation_factor = Some(factor);
        self
    }

    /// Set the estimate latency
    pub fn latency(mut self, duration: Duration) -> Self {
        self.latency = Some(duration);
        self
    }

    /// Set the lead acknowledgement latency
    pub fn lead_latency(mut self, duration: Duration) -> Self {
        self.lead_latency = Some(duration);
        self
    }

    /// Set the default loan interest rate
    pub fn loan_rate_percent(mut self, rate: f64) -> Self {
        self.loan_rate_percent = Some(rate);
        self
    }

    /// Set the default loan tenure
    pub fn loan_tenure_years(mut self, years: u32) -> Self {
        self.loan_tenure_years = Some(years);
        self
    }

    /// Set the principal used when no valuation exists
    pub fn fallback_principal(mut self, principal: f64) -> Self {
        self.fallback_principal = Some(principal);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ValuationConfig> {
        let defaults = ValuationConfig::default();

        let config = ValuationConfig {
            inflation_factor: self.inflation_factor.unwrap_or(defaults.inflation_factor),
            latency_ms: self
                .latency
                .map_or(defaults.latency_ms, |d| d.as_millis() as u64),
            lead_latency_ms: self
                .lead_latency
                .map_or(defaults.lead_latency_ms, |d| d.as_millis() as u64),
            loan_rate_percent: self.loan_rate_percent.unwrap_or(defaults.loan_rate_percent),
            loan_tenure_years: self.loan_tenure_years.unwrap_or(defaults.loan_tenure_years),
            fallback_principal: self.fallback_principal.unwrap_or(defaults.fallback_principal),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ValuationConfig::default();
        assert!((config.inflation_factor - INFLATION_FACTOR_2026).abs() < f64::EPSILON);
        assert_eq!(config.latency(), Duration::from_secs(2));
        assert_eq!(config.lead_latency(), Duration::from_millis(1500));
        assert_eq!(config.loan_tenure_years, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ValuationConfig::builder()
            .inflation_factor(1.05)
            .latency(Duration::ZERO)
            .loan_rate_percent(9.1)
            .build()
            .unwrap();

        assert!((config.inflation_factor - 1.05).abs() < f64::EPSILON);
        assert_eq!(config.latency_ms, 0);
        assert!((config.loan_rate_percent - 9.1).abs() < f64::EPSILON);
        assert_eq!(config.loan_tenure_years, 20);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ValuationConfig {
            inflation_factor: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ValuationConfig {
            loan_tenure_years: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(ValuationConfig::builder().loan_rate_percent(-1.0).build().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_LATENCY_MS, "0"),
            (ENV_LOAN_RATE, " 7.25 "),
        ]);
        let config = ValuationConfig::default()
            .with_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.latency_ms, 0);
        assert!((config.loan_rate_percent - 7.25).abs() < f64::EPSILON);
        assert_eq!(config.lead_latency_ms, 1500);
    }

    #[test]
    fn test_unparsable_override() {
        let result = ValuationConfig::default().with_overrides(|key| {
            (key == ENV_LOAN_TENURE).then(|| "twenty".to_string())
        });
        assert!(matches!(result, Err(ValuationError::ConfigError(_))));
    }

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("livest-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_file_partial_json() {
        let path = write_temp(r#"{"loan_rate_percent": 9.25, "latency_ms": 0}"#);
        let config = ValuationConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert!((config.loan_rate_percent - 9.25).abs() < f64::EPSILON);
        assert_eq!(config.latency(), Duration::ZERO);
        assert_eq!(config.loan_tenure_years, 20);
        assert_eq!(config.lead_latency_ms, 1500);
    }

    #[test]
    fn test_from_file_invalid_values() {
        let path = write_temp(r#"{"loan_tenure_years": 0}"#);
        let result = ValuationConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ValuationError::ConfigError(_))));

        let path = write_temp(r#"{"loan_tenure_years": 400000000}"#);
        let result = ValuationConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ValuationError::ConfigError(_))));

        let path = write_temp("{not json");
        let result = ValuationConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ValuationError::JsonError(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ValuationConfig::from_file("/definitely/not/here/livest.json");
        assert!(matches!(result, Err(ValuationError::IoError(_))));
    }

    #[test]
    fn test_json_defaults() {
        let config: ValuationConfig = serde_json::from_str(r#"{"latency_ms": 10}"#).unwrap();
        assert_eq!(config.latency_ms, 10);
        assert_eq!(config.loan_tenure_years, 20);
    }
}
