//! Response formatting utilities

use crate::currency::{format_inr, format_inr_per_sqft};
use crate::engine::{HouseQuery, Valuation};
use crate::interface::commands::Command;
use crate::lead::LeadReceipt;
use crate::loan::{EmiBreakdown, LoanTerms};
use crate::locality::Locality;
use comfy_table::{Table, presets::UTF8_FULL};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// How results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables for a terminal
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

pub trait Formatter: Send + Sync {
    fn output_format(&self) -> OutputFormat;
    fn format_valuation(&self, query: &HouseQuery, valuation: &Valuation) -> String;
    fn format_localities(&self, localities: &[&Locality]) -> String;
    fn format_emi(&self, terms: &LoanTerms, breakdown: &EmiBreakdown) -> String;
    fn format_receipt(&self, receipt: &LeadReceipt) -> String;
    fn format_error(&self, error: &str) -> String;
    fn format_help(&self) -> String;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

pub struct CliFormatter;

impl Formatter for CliFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Table
    }

    fn format_valuation(&self, query: &HouseQuery, valuation: &Valuation) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} | {} sqft | {} BHK | {} bath\n",
            valuation.locality, query.sqft, query.bhk, query.bathrooms
        ));
        if valuation.locality != query.neighborhood {
            output.push_str(&format!(
                "(no data for '{}', showing {})\n",
                query.neighborhood, valuation.locality
            ));
        }
        output.push('\n');

        let mut summary = new_table();
        summary.set_header(vec!["Estimated value", "Price / sqft", "Confidence", "Trend", "Tier"]);
        summary.add_row(vec![
            format_inr(valuation.estimated_price),
            format_inr_per_sqft(valuation.price_per_sqft),
            format!("{}%", valuation.confidence_percent()),
            valuation.market_trend.to_string(),
            format!("{} ({})", valuation.locality_tier, valuation.locality_tier.label()),
        ]);
        output.push_str(&summary.to_string());
        output.push_str("\n\n");

        let l = valuation.lifestyle;
        let mut lifestyle = new_table();
        lifestyle.set_header(vec!["Connectivity", "Education", "Work-life", "Overall"]);
        lifestyle.add_row(vec![
            l.connectivity.to_string(),
            l.education.to_string(),
            l.work_life.to_string(),
            l.overall.to_string(),
        ]);
        output.push_str(&lifestyle.to_string());
        output.push_str("\n\n");

        if let Some((low, high)) = valuation.comparable_price_range() {
            output.push_str(&format!(
                "Comparables range from {} to {}, best match first\n",
                format_inr(low),
                format_inr(high)
            ));
        }

        let mut comparables = new_table();
        comparables.set_header(vec!["Property", "Price", "Sqft", "Beds", "Baths", "Match", "Amenities"]);
        for listing in valuation.best_matches(valuation.comparables.len()) {
            comparables.add_row(vec![
                listing.title.clone(),
                format_inr(listing.price),
                listing.sqft.to_string(),
                listing.beds.to_string(),
                listing.baths.to_string(),
                format!("{}%", listing.match_score),
                listing.amenities.join(", "),
            ]);
        }
        output.push_str(&comparables.to_string());
        output
    }

    fn format_localities(&self, localities: &[&Locality]) -> String {
        if localities.is_empty() {
            return "No localities found in our 2026 database.".to_string();
        }

        let mut table = new_table();
        table.set_header(vec!["Locality", "City", "Tier", "Base rate", "Demand"]);
        for locality in localities {
            table.add_row(vec![
                locality.name.clone(),
                locality.city.clone(),
                locality.tier.number().to_string(),
                format_inr_per_sqft(locality.base_rate),
                (if locality.is_high_demand { "HIGH DEMAND" } else { "" }).to_string(),
            ]);
        }
        table.to_string()
    }

    fn format_emi(&self, terms: &LoanTerms, breakdown: &EmiBreakdown) -> String {
        let mut table = new_table();
        table.set_header(vec!["Loan amount", "Rate", "Tenure", "Monthly EMI", "Total interest"]);
        table.add_row(vec![
            format_inr(terms.principal),
            format!("{}%", terms.annual_rate_percent),
            format!("{} years", terms.tenure_years),
            format_inr(breakdown.emi),
            format_inr(breakdown.total_interest),
        ]);
        table.to_string()
    }

    fn format_receipt(&self, receipt: &LeadReceipt) -> String {
        format!(
            "Message sent. An advisor will reach out shortly.\n  Subject: {}\n  Reference: {}",
            receipt.subject, receipt.reference
        )
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {error}")
    }

    fn format_help(&self) -> String {
        Command::help_text().to_string()
    }
}

pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

impl Formatter for JsonFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn format_valuation(&self, query: &HouseQuery, valuation: &Valuation) -> String {
        Self::render(&json!({ "query": query, "valuation": valuation }))
    }

    fn format_localities(&self, localities: &[&Locality]) -> String {
        Self::render(&json!(localities))
    }

    fn format_emi(&self, terms: &LoanTerms, breakdown: &EmiBreakdown) -> String {
        Self::render(&json!({ "terms": terms, "breakdown": breakdown }))
    }

    fn format_receipt(&self, receipt: &LeadReceipt) -> String {
        Self::render(&json!(receipt))
    }

    fn format_error(&self, error: &str) -> String {
        Self::render(&json!({ "error": error }))
    }

    fn format_help(&self) -> String {
        Self::render(&json!({ "help": Command::help_text() }))
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat) -> Box<dyn Formatter> {
        match format {
            OutputFormat::Table => Box::new(CliFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}
