//! Valuation result types

use crate::locality::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse direction of the local market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Up,
    Stable,
    Down,
}

impl MarketTrend {
    /// Trend for a tier. Only premium localities read as rising; mid and
    /// emerging both read as stable and `Down` is never produced.
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Premium => MarketTrend::Up,
            Tier::Mid | Tier::Emerging => MarketTrend::Stable,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarketTrend::Up => "up",
            MarketTrend::Stable => "stable",
            MarketTrend::Down => "down",
        }
    }
}

impl fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 0-100 neighborhood ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleScores {
    pub connectivity: u32,
    pub education: u32,
    pub work_life: u32,
    pub overall: u32,
}

impl LifestyleScores {
    /// Build scores, deriving `overall` as the rounded mean
    pub fn new(connectivity: u32, education: u32, work_life: u32) -> Self {
        let mean = f64::from(connectivity + education + work_life) / 3.0;
        Self {
            connectivity,
            education,
            work_life,
            overall: mean.round() as u32,
        }
    }
}

/// Synthetic listing shown next to a valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableProperty {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub sqft: u32,
    pub beds: u32,
    pub baths: u32,
    pub image_url: String,
    /// How closely the listing matches the query, in percent
    pub match_score: u32,
    pub amenities: Vec<String>,
}

/// Estimate for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub estimated_price: f64,
    pub confidence_score: f64,
    pub price_per_sqft: f64,
    pub market_trend: MarketTrend,
    pub comparables: Vec<ComparableProperty>,
    pub lifestyle: LifestyleScores,
    pub locality_tier: Tier,
    /// Locality actually used, after fallback
    pub locality: String,
}

impl Valuation {
    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence_score * 100.0).round() as u32
    }

    /// Lowest and highest comparable price
    pub fn comparable_price_range(&self) -> Option<(f64, f64)> {
        let mut prices = self.comparables.iter().map(|c| c.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Comparables ordered by match score, best first
    pub fn best_matches(&self, limit: usize) -> Vec<&ComparableProperty> {
        let mut sorted: Vec<_> = self.comparables.iter().collect();
        sorted.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, match_score: u32) -> ComparableProperty {
        ComparableProperty {
            id: format!("prop-{match_score}"),
            title: "Azure Residency".to_string(),
            location: "Tellapur".to_string(),
            price,
            sqft: 2400,
            beds: 3,
            baths: 3,
            image_url: String::new(),
            match_score,
            amenities: Vec::new(),
        }
    }

    #[test]
    fn test_lifestyle_overall_is_rounded_mean() {
        let scores = LifestyleScores::new(80, 70, 82);
        assert_eq!(scores.overall, 77); // 232 / 3 = 77.33

        let scores = LifestyleScores::new(71, 60, 82);
        assert_eq!(scores.overall, 71); // 213 / 3 = 71.0

        let scores = LifestyleScores::new(95, 95, 45);
        assert_eq!(scores.overall, 78); // 235 / 3 = 78.33
    }

    #[test]
    fn test_trend_for_tier() {
        assert_eq!(MarketTrend::for_tier(Tier::Premium), MarketTrend::Up);
        assert_eq!(MarketTrend::for_tier(Tier::Mid), MarketTrend::Stable);
        // emerging localities are not distinguished from mid-market ones
        assert_eq!(MarketTrend::for_tier(Tier::Emerging), MarketTrend::Stable);
        assert_eq!(serde_json::to_string(&MarketTrend::Up).unwrap(), "\"up\"");
    }

    #[test]
    fn test_price_range_and_best_matches() {
        let valuation = Valuation {
            estimated_price: 100.0,
            confidence_score: 0.934,
            price_per_sqft: 1.0,
            market_trend: MarketTrend::Stable,
            comparables: vec![listing(90.0, 85), listing(110.0, 97), listing(95.0, 90)],
            lifestyle: LifestyleScores::new(80, 80, 80),
            locality_tier: Tier::Mid,
            locality: "Tellapur".to_string(),
        };

        assert_eq!(valuation.confidence_percent(), 93);
        assert_eq!(valuation.comparable_price_range(), Some((90.0, 110.0)));
        let best: Vec<_> = valuation.best_matches(2).iter().map(|c| c.match_score).collect();
        assert_eq!(best, vec![97, 90]);
    }
}
