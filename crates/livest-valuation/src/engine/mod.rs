//! Valuation Engine
//!
//! Turns a [`HouseQuery`] into a [`Valuation`]: price formula over the
//! locality table, jittered lifestyle scores and synthetic comparables.

pub mod estimation_engine;
pub mod query;
pub mod result;

pub use estimation_engine::{
    COMPARABLE_COUNT, EstimationEngine, EstimationEngineBuilder, PriceBreakdown, Valuator,
};
pub use query::HouseQuery;
pub use result::{ComparableProperty, LifestyleScores, MarketTrend, Valuation};
