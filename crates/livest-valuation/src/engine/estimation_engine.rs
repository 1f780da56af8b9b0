//! Estimation engine - price formula, lifestyle scores and comparables

use crate::config::ValuationConfig;
use crate::error::{Result, ValuationError};
use crate::latency::{self, Latency, NoLatency};
use crate::locality::{Locality, LocalityTable};
use crate::random::{self, RandomSource, SeededRandom, ThreadRandom};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::query::HouseQuery;
use super::result::{ComparableProperty, LifestyleScores, MarketTrend, Valuation};

/// Comparables generated for every valuation
pub const COMPARABLE_COUNT: usize = 12;

const BHK_PREMIUM_STEP: f64 = 0.12;
const BATH_PREMIUM_STEP: f64 = 0.08;

const CONFIDENCE_FLOOR: f64 = 0.92;
const CONFIDENCE_SPREAD: f64 = 0.05;

const PROPERTY_IMAGE_IDS: [&str; 12] = [
    "1600585154340-be6161a56a0c",
    "1512917774080-9991f1c4c750",
    "1600607687940-4e2a09695d51",
    "1600047509807-ba8f99d2cdde",
    "1600596542815-ffad4c1539a9",
    "1480074568708-e7b720bb3f09",
    "1600566753376-12c8ab7fb75b",
    "1564013799919-ab600027ffc6",
    "1600210492486-724fe5c67fb0",
    "1600573472591-ee6b68d14c68",
    "1605276374104-dee2a0ed3cd6",
    "1416331108676-a22ccb276e35",
];

const AMENITIES_POOL: [&str; 10] = [
    "SMART HOME TECH",
    "EV CHARGING",
    "GYM & YOGA STUDIO",
    "CLOSE TO METRO",
    "PRIVATE GARDEN",
    "GATED SECURITY",
    "ROOFTOP INFINITY POOL",
    "MARBLE FLOORING",
    "DESIGNER KITCHEN",
    "HOME CINEMA",
];

const TITLE_NAMES: [&str; 10] = [
    "Azure", "Summit", "Haven", "Pine", "Crystal", "Orchid", "Zenith", "Heritage", "Aura", "Serene",
];

const TITLE_KINDS: [&str; 6] = ["Residency", "Gardens", "Villas", "Estates", "Courts", "Terraces"];

fn image_url(id: &str) -> String {
    format!("https://images.unsplash.com/photo-{id}?auto=format&fit=crop&w=1200&q=80")
}

/// Anything that can value a house
#[async_trait]
pub trait Valuator: Send + Sync {
    /// Produce a valuation for the query
    async fn estimate(&self, query: &HouseQuery) -> Result<Valuation>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Deterministic part of a valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub tier_multiplier: f64,
    pub bhk_premium: f64,
    pub bath_premium: f64,
    pub base_price_per_sqft: f64,
    pub estimated_price: f64,
}

impl PriceBreakdown {
    /// Apply the price formula to a query and its resolved locality
    pub fn compute(query: &HouseQuery, locality: &Locality, inflation_factor: f64) -> Self {
        let tier_multiplier = locality.tier.multiplier();
        let bhk_premium = 1.0 + f64::from(query.bhk) * BHK_PREMIUM_STEP;
        let bath_premium = 1.0 + f64::from(query.bathrooms) * BATH_PREMIUM_STEP;

        let base_price_per_sqft = locality.base_rate * inflation_factor * tier_multiplier;
        let estimated_price = f64::from(query.sqft) * base_price_per_sqft * bhk_premium * bath_premium;

        Self {
            tier_multiplier,
            bhk_premium,
            bath_premium,
            base_price_per_sqft,
            estimated_price,
        }
    }
}

/// Valuation engine over an injected locality table, random source and latency
pub struct EstimationEngine {
    localities: Arc<LocalityTable>,
    inflation_factor: f64,
    latency: Arc<dyn Latency>,
    random: Mutex<Box<dyn RandomSource>>,
}

impl EstimationEngine {
    /// Engine with the built-in table, thread randomness and configured latency
    pub fn new(config: &ValuationConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> EstimationEngineBuilder {
        EstimationEngineBuilder::default()
    }

    pub fn localities(&self) -> &LocalityTable {
        &self.localities
    }

    /// Shared handle to the locality table
    pub fn locality_table(&self) -> Arc<LocalityTable> {
        Arc::clone(&self.localities)
    }

    pub fn inflation_factor(&self) -> f64 {
        self.inflation_factor
    }

    /// Value a house.
    ///
    /// Zero floor area is rejected up front. Unknown localities are not an
    /// error: they silently resolve to the first table entry.
    pub async fn estimate(&self, query: &HouseQuery) -> Result<Valuation> {
        if query.sqft == 0 {
            warn!(neighborhood = %query.neighborhood, "Rejected valuation with zero floor area");
            return Err(ValuationError::invalid(
                "sqft",
                "floor area must be greater than zero",
            ));
        }

        debug!(latency_ms = self.latency.duration().as_millis() as u64, "Simulating valuation latency");
        self.latency.pause().await;

        let locality = match self.localities.find(&query.neighborhood) {
            Some(locality) => locality,
            None => {
                let fallback = self.localities.default_locality();
                warn!(
                    requested = %query.neighborhood,
                    fallback = %fallback.name,
                    "Unknown locality, using default"
                );
                fallback
            }
        };

        let breakdown = PriceBreakdown::compute(query, locality, self.inflation_factor);

        let mut guard = self.random.lock().await;
        let rng: &mut dyn RandomSource = &mut **guard;

        let lifestyle = lifestyle_scores(rng, locality);
        let comparables = (0..COMPARABLE_COUNT)
            .map(|position| comparable(rng, position, query, locality, breakdown.estimated_price))
            .collect();
        let confidence_score = random::uniform(rng, CONFIDENCE_FLOOR, CONFIDENCE_FLOOR + CONFIDENCE_SPREAD);
        drop(guard);

        let valuation = Valuation {
            estimated_price: breakdown.estimated_price,
            confidence_score,
            price_per_sqft: breakdown.estimated_price / f64::from(query.sqft),
            market_trend: MarketTrend::for_tier(locality.tier),
            comparables,
            lifestyle,
            locality_tier: locality.tier,
            locality: locality.name.clone(),
        };

        info!(
            locality = %valuation.locality,
            sqft = query.sqft,
            bhk = query.bhk,
            estimated_price = valuation.estimated_price,
            "Valuation ready"
        );

        Ok(valuation)
    }
}

#[async_trait]
impl Valuator for EstimationEngine {
    async fn estimate(&self, query: &HouseQuery) -> Result<Valuation> {
        EstimationEngine::estimate(self, query).await
    }

    fn name(&self) -> &str {
        "livest-estimator"
    }
}

fn lifestyle_scores(rng: &mut dyn RandomSource, locality: &Locality) -> LifestyleScores {
    let connectivity = random::uniform(rng, 70.0, 95.0).round() as u32;
    let education = random::uniform(rng, 60.0, 95.0).round() as u32;
    let work_life = (locality.proximity_to_it * 100.0).round() as u32;
    LifestyleScores::new(connectivity, education, work_life)
}

fn comparable(
    rng: &mut dyn RandomSource,
    position: usize,
    query: &HouseQuery,
    locality: &Locality,
    estimated_price: f64,
) -> ComparableProperty {
    let price = estimated_price * random::uniform(rng, 0.82, 1.18);
    let sqft = (f64::from(query.sqft) * random::uniform(rng, 0.8, 1.2)).round() as u32;

    let amenity_count = 2 + random::index(rng, 3);
    let amenities = random::sample(rng, &AMENITIES_POOL, amenity_count)
        .into_iter()
        .map(String::from)
        .collect();

    let id = format!("prop-{position}-{}-{}", locality.slug(), random::base36(rng, 9));

    let bed_delta: i64 = if position % 2 == 0 {
        0
    } else if rng.next_f64() > 0.5 {
        1
    } else {
        -1
    };
    let beds = (i64::from(query.bhk) + bed_delta).clamp(1, i64::from(u32::MAX)) as u32;
    let baths = query
        .bathrooms
        .saturating_add(u32::from(position % 3 != 0))
        .max(1);

    let match_score = random::uniform(rng, 82.0, 99.0).round() as u32;

    ComparableProperty {
        id,
        title: format!(
            "{} {}",
            TITLE_NAMES[position % TITLE_NAMES.len()],
            TITLE_KINDS[position % TITLE_KINDS.len()]
        ),
        location: locality.name.clone(),
        price,
        sqft,
        beds,
        baths,
        image_url: image_url(PROPERTY_IMAGE_IDS[position % PROPERTY_IMAGE_IDS.len()]),
        match_score,
        amenities,
    }
}

/// Builder for EstimationEngine
#[derive(Default)]
pub struct EstimationEngineBuilder {
    localities: Option<LocalityTable>,
    inflation_factor: Option<f64>,
    latency: Option<Arc<dyn Latency>>,
    random: Option<Box<dyn RandomSource>>,
}

impl EstimationEngineBuilder {
    /// Take inflation factor and latency from a config
    pub fn config(mut self, config: &ValuationConfig) -> Self {
        self.inflation_factor = Some(config.inflation_factor);
        self.latency = Some(latency::for_duration(config.latency()));
        self
    }

    pub fn localities(mut self, table: LocalityTable) -> Self {
        self.localities = Some(table);
        self
    }

    pub fn inflation_factor(mut self, factor: f64) -> Self {
        self.inflation_factor = Some(factor);
        self
    }

    pub fn latency(mut self, latency: Arc<dyn Latency>) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Skip the artificial pause
    pub fn no_latency(self) -> Self {
        self.latency(Arc::new(NoLatency))
    }

    pub fn random(mut self, source: impl RandomSource + 'static) -> Self {
        self.random = Some(Box::new(source));
        self
    }

    /// Use a seeded generator so results are reproducible
    pub fn seed(self, seed: u64) -> Self {
        self.random(SeededRandom::new(seed))
    }

    /// Build the engine
    pub fn build(self) -> Result<EstimationEngine> {
        let defaults = ValuationConfig::default();
        let inflation_factor = self.inflation_factor.unwrap_or(defaults.inflation_factor);
        if !inflation_factor.is_finite() || inflation_factor <= 0.0 {
            return Err(ValuationError::ConfigError(
                "inflation_factor must be a positive number".to_string(),
            ));
        }

        Ok(EstimationEngine {
            localities: Arc::new(self.localities.unwrap_or_default()),
            inflation_factor,
            latency: self
                .latency
                .unwrap_or_else(|| latency::for_duration(defaults.latency())),
            random: Mutex::new(self.random.unwrap_or_else(|| Box::new(ThreadRandom))),
        })
    }
}
