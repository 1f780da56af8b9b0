//! Property valuation for the Livest demo
//!
//! This crate turns a locality, floor area and room configuration into a
//! price estimate with lifestyle scores and a set of comparable listings.
//! It includes:
//!
//! - A static South India locality table with tiers and base rates
//! - The estimation engine (price formula plus randomized jitter)
//! - A home loan EMI estimator
//! - Lead capture for buyers who want an advisor to call back
//! - Indian rupee formatting, table/JSON formatters and an interactive session
//!
//! The estimate is arithmetic over the locality table, not a trained model.
//! Randomness and the artificial latency are both injected, so a seeded
//! engine with no latency is fully reproducible.
//!
//! # Example
//!
//! ```rust,no_run
//! use livest_valuation::{EstimationEngine, HouseQuery};
//!
//! #[tokio::main]
//! async fn main() -> livest_valuation::Result<()> {
//!     let engine = EstimationEngine::builder().seed(7).no_latency().build()?;
//!     let valuation = engine.estimate(&HouseQuery::new(2400, 3, 3, "Tellapur")).await?;
//!     println!("{}", livest_valuation::format_inr(valuation.estimated_price));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod interface;
pub mod latency;
pub mod lead;
pub mod loan;
pub mod locality;
pub mod random;

// Re-export main types for convenience
pub use config::ValuationConfig;
pub use currency::{format_inr, format_inr_per_sqft};
pub use engine::{
    ComparableProperty, EstimationEngine, HouseQuery, LifestyleScores, MarketTrend, PriceBreakdown,
    Valuation, Valuator,
};
pub use error::{Result, ValuationError};
pub use latency::{FixedLatency, Latency, NoLatency};
pub use lead::{LeadDesk, LeadInquiry, LeadReceipt};
pub use loan::{EmiBreakdown, LoanTerms};
pub use locality::{Locality, LocalityTable, Tier};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
