//! Interactive valuation session

use crate::config::ValuationConfig;
use crate::engine::{HouseQuery, Valuation, Valuator};
use crate::error::Result;
use crate::interface::commands::Command;
use crate::interface::formatter::Formatter;
use crate::lead::{LeadDesk, LeadInquiry};
use crate::loan::LoanTerms;
use crate::locality::LocalityTable;
use std::sync::Arc;
use tracing::{debug, error};

/// What the prompt should do after a line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep going
    Output(String),
    /// Leave the prompt
    Exit,
}

/// One user's prompt: remembers the last valuation so `/emi` can borrow
/// against it and `/contact` can mention it
pub struct ValuationSession {
    valuator: Arc<dyn Valuator>,
    localities: Arc<LocalityTable>,
    leads: LeadDesk,
    config: ValuationConfig,
    formatter: Box<dyn Formatter>,
    last: Option<(HouseQuery, Valuation)>,
}

impl ValuationSession {
    pub fn new(
        valuator: Arc<dyn Valuator>,
        localities: Arc<LocalityTable>,
        leads: LeadDesk,
        config: ValuationConfig,
        formatter: Box<dyn Formatter>,
    ) -> Self {
        Self {
            valuator,
            localities,
            leads,
            config,
            formatter,
            last: None,
        }
    }

    pub fn prompt(&self) -> String {
        match &self.last {
            Some((_, valuation)) => format!("livest [{}]> ", valuation.locality),
            None => "livest> ".to_string(),
        }
    }

    pub fn last_valuation(&self) -> Option<&Valuation> {
        self.last.as_ref().map(|(_, v)| v)
    }

    /// Handle one line of input. Errors are rendered, never returned.
    pub async fn process_input(&mut self, input: &str) -> Reply {
        match self.dispatch(input).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Command failed");
                Reply::Output(self.formatter.format_error(&e.to_string()))
            }
        }
    }

    async fn dispatch(&mut self, input: &str) -> Result<Reply> {
        let command = Command::parse(input)?;
        debug!(command = command.description(), "Handling command");

        let output = match command {
            Command::Estimate { query } => {
                debug!(valuator = self.valuator.name(), "Requesting valuation");
                let valuation = self.valuator.estimate(&query).await?;
                let text = self.formatter.format_valuation(&query, &valuation);
                self.last = Some((query, valuation));
                text
            }
            Command::Emi {
                principal,
                rate,
                years,
            } => {
                let mut terms = LoanTerms::from_config(&self.config, self.last_valuation());
                if let Some(principal) = principal {
                    terms = terms.with_principal(principal);
                }
                if let Some(rate) = rate {
                    terms = terms.with_rate(rate);
                }
                if let Some(years) = years {
                    terms = terms.with_tenure(years);
                }
                let breakdown = terms.breakdown()?;
                self.formatter.format_emi(&terms, &breakdown)
            }
            Command::Localities { filter } => {
                let matches = match filter {
                    Some(filter) => self.localities.search(&filter),
                    None => self.localities.iter().collect(),
                };
                self.formatter.format_localities(&matches)
            }
            Command::Contact {
                name,
                email,
                message,
            } => {
                let mut inquiry = LeadInquiry::new(name, email, message);
                if let Some((query, valuation)) = &self.last {
                    inquiry = inquiry.about(format!("a {} BHK in {}", query.bhk, valuation.locality));
                }
                let receipt = self.leads.submit(&inquiry).await?;
                self.formatter.format_receipt(&receipt)
            }
            Command::Help => self.formatter.format_help(),
            Command::Exit => return Ok(Reply::Exit),
        };

        Ok(Reply::Output(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EstimationEngine;
    use crate::interface::formatter::{CliFormatter, JsonFormatter};
    use crate::latency::NoLatency;

    fn session(formatter: Box<dyn Formatter>) -> ValuationSession {
        let engine = EstimationEngine::builder().no_latency().seed(3).build().unwrap();
        let localities = engine.locality_table();
        ValuationSession::new(
            Arc::new(engine),
            localities,
            LeadDesk::new(Arc::new(NoLatency)).unwrap(),
            ValuationConfig::default(),
            formatter,
        )
    }

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Exit => panic!("unexpected exit"),
        }
    }

    #[tokio::test]
    async fn test_estimate_then_emi_uses_valuation() {
        let mut session = session(Box::new(JsonFormatter));
        assert_eq!(session.prompt(), "livest> ");

        let text = output(session.process_input("/estimate 2400 3 3 Tellapur").await);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["valuation"]["locality"], "Tellapur");
        assert_eq!(session.prompt(), "livest [Tellapur]> ");

        let price = session.last_valuation().map(|v| v.estimated_price).unwrap();
        let text = output(session.process_input("/emi").await);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let principal = value["terms"]["principal"].as_f64().unwrap();
        assert!((principal - price).abs() < 1e-3);
        assert_eq!(value["terms"]["tenure_years"], 20);
    }

    #[tokio::test]
    async fn test_emi_without_valuation_uses_fallback() {
        let mut session = session(Box::new(CliFormatter));
        let text = output(session.process_input("/emi").await);
        assert!(text.contains("₹1,00,00,000"));
        assert!(text.contains("₹86,782"));
    }

    #[tokio::test]
    async fn test_errors_are_rendered() {
        let mut session = session(Box::new(CliFormatter));
        let text = output(session.process_input("/estimate 0").await);
        assert!(text.starts_with("Error: Invalid input for sqft"));
        assert!(session.last_valuation().is_none());

        let text = output(session.process_input("/emi 100000 8 0").await);
        assert!(text.contains("tenure"));

        let text = output(session.process_input("/nope").await);
        assert_eq!(text, "Error: Command error: Unknown command: nope");
    }

    #[tokio::test]
    async fn test_contact_mentions_last_query() {
        let mut session = session(Box::new(JsonFormatter));
        session.process_input("/e 1200 2 2 Kakkanad").await;

        let text = output(
            session
                .process_input("/contact Asha Rao asha@example.com Please call")
                .await,
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["subject"], "Inquiry for a 2 BHK in Kakkanad");
    }

    #[tokio::test]
    async fn test_contact_names_resolved_locality() {
        let mut session = session(Box::new(JsonFormatter));
        session.process_input("/e 2400 3 3 Atlantis").await;

        let text = output(
            session
                .process_input("/contact Asha Rao asha@example.com Please call")
                .await,
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["subject"], "Inquiry for a 3 BHK in Gachibowli");
    }

    #[tokio::test]
    async fn test_oversized_inputs_are_rendered_not_fatal() {
        let mut session = session(Box::new(CliFormatter));

        let text = output(session.process_input("/estimate 2400 3 4294967295 Tellapur").await);
        assert!(text.contains("Tellapur | 2400 sqft | 3 BHK | 4294967295 bath"));
        assert!(session.last_valuation().is_some());

        let text = output(session.process_input("/emi 1000000 8.5 400000000").await);
        assert!(text.starts_with("Error: Invalid input for tenure_years"));
    }

    #[tokio::test]
    async fn test_search_help_and_exit() {
        let mut session = session(Box::new(CliFormatter));
        let text = output(session.process_input("kochi").await);
        assert!(text.contains("Kakkanad"));

        let text = output(session.process_input("/help").await);
        assert!(text.contains("/estimate"));

        assert_eq!(session.process_input("/exit").await, Reply::Exit);
    }
}
