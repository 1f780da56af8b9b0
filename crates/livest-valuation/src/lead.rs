//! Lead capture for buyers who want an advisor to call back
//!
//! Inquiries are checked, acknowledged after the configured pause and logged.
//! Nothing is stored.

use crate::config::ValuationConfig;
use crate::error::{Result, ValuationError};
use crate::latency::{self, Latency};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Subject used when the inquiry is not about a specific listing
pub const GENERAL_SUBJECT: &str = "Tell us about your requirements.";

/// A contact request from a prospective buyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadInquiry {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Listing title when the inquiry came from a comparable card
    pub property: Option<String>,
}

impl LeadInquiry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            property: None,
        }
    }

    pub fn about(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn subject(&self) -> String {
        match self.property.as_deref().map(str::trim) {
            Some(property) if !property.is_empty() => format!("Inquiry for {property}"),
            _ => GENERAL_SUBJECT.to_string(),
        }
    }
}

/// Acknowledgement handed back once an inquiry is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReceipt {
    pub reference: Uuid,
    pub subject: String,
    pub received_at: DateTime<Utc>,
}

/// Accepts lead inquiries
pub struct LeadDesk {
    latency: Arc<dyn Latency>,
    email: Regex,
}

impl LeadDesk {
    pub fn new(latency: Arc<dyn Latency>) -> Result<Self> {
        let email = Regex::new(EMAIL_PATTERN)
            .map_err(|e| ValuationError::ConfigError(format!("email pattern: {e}")))?;
        Ok(Self { latency, email })
    }

    pub fn from_config(config: &ValuationConfig) -> Result<Self> {
        Self::new(latency::for_duration(config.lead_latency()))
    }

    /// Check required fields and the email shape
    pub fn validate(&self, inquiry: &LeadInquiry) -> Result<()> {
        if inquiry.name.trim().is_empty() {
            return Err(ValuationError::invalid("name", "name is required"));
        }
        if !self.email.is_match(inquiry.email.trim()) {
            return Err(ValuationError::invalid(
                "email",
                format!("'{}' is not a valid email address", inquiry.email),
            ));
        }
        if inquiry.message.trim().is_empty() {
            return Err(ValuationError::invalid("message", "message is required"));
        }
        Ok(())
    }

    /// Validate, wait out the acknowledgement pause and issue a receipt
    pub async fn submit(&self, inquiry: &LeadInquiry) -> Result<LeadReceipt> {
        self.validate(inquiry)?;
        self.latency.pause().await;

        let receipt = LeadReceipt {
            reference: Uuid::new_v4(),
            subject: inquiry.subject(),
            received_at: Utc::now(),
        };

        info!(
            reference = %receipt.reference,
            subject = %receipt.subject,
            "Lead inquiry received"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::{FixedLatency, NoLatency};
    use std::time::Duration;

    fn desk() -> LeadDesk {
        LeadDesk::new(Arc::new(NoLatency)).unwrap()
    }

    fn inquiry() -> LeadInquiry {
        LeadInquiry::new("Asha Rao", "asha@example.com", "I'm interested in viewing this property")
    }

    #[test]
    fn test_subject() {
        assert_eq!(inquiry().subject(), GENERAL_SUBJECT);
        assert_eq!(
            inquiry().about("Azure Residency").subject(),
            "Inquiry for Azure Residency"
        );
        assert_eq!(inquiry().about("  ").subject(), GENERAL_SUBJECT);
    }

    #[test]
    fn test_validation() {
        let desk = desk();
        assert!(desk.validate(&inquiry()).is_ok());

        let missing_name = LeadInquiry {
            name: " ".to_string(),
            ..inquiry()
        };
        assert!(matches!(
            desk.validate(&missing_name),
            Err(ValuationError::InvalidInput { field: "name", .. })
        ));

        for email in ["", "asha", "asha@example", "a sha@example.com", "@example.com"] {
            let bad = LeadInquiry {
                email: email.to_string(),
                ..inquiry()
            };
            assert!(desk.validate(&bad).is_err(), "{email} should be rejected");
        }

        let empty_message = LeadInquiry {
            message: String::new(),
            ..inquiry()
        };
        assert!(desk.validate(&empty_message).is_err());
    }

    #[test]
    fn test_submit_issues_receipt() {
        let desk = desk();
        let receipt = tokio_test::block_on(desk.submit(&inquiry().about("Pine Estates"))).unwrap();
        assert_eq!(receipt.subject, "Inquiry for Pine Estates");

        let other = tokio_test::block_on(desk.submit(&inquiry())).unwrap();
        assert_ne!(receipt.reference, other.reference);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_only_when_valid() {
        let desk = LeadDesk::new(Arc::new(FixedLatency::new(Duration::from_millis(1500)))).unwrap();

        let start = tokio::time::Instant::now();
        let bad = LeadInquiry::new("Asha", "nope", "hi");
        assert!(desk.submit(&bad).await.is_err());
        assert_eq!(start.elapsed(), Duration::ZERO);

        desk.submit(&inquiry()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
