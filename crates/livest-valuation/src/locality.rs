//! Locality reference data
//!
//! A [`LocalityTable`] is built once and handed to the engine. It never
//! changes afterwards, so it can be shared freely between concurrent
//! estimates.

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Projected 2026 adjustment applied on top of every base rate.
pub const INFLATION_FACTOR_2026: f64 = 1.12;

/// Coarse locality classification driving the price multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Established, high-value neighborhoods
    Premium = 1,
    /// Mid-market neighborhoods
    Mid = 2,
    /// Growth corridors
    Emerging = 3,
}

impl Tier {
    /// Price multiplier applied to the base rate
    pub fn multiplier(self) -> f64 {
        match self {
            Tier::Premium => 1.15,
            Tier::Mid => 1.0,
            Tier::Emerging => 0.85,
        }
    }

    /// Numeric tier (1 = premium, 3 = emerging)
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            Tier::Premium => "Premium",
            Tier::Mid => "Mid-market",
            Tier::Emerging => "Emerging",
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = ValuationError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Tier::Premium),
            2 => Ok(Tier::Mid),
            3 => Ok(Tier::Emerging),
            other => Err(ValuationError::ConfigError(format!(
                "tier must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.number()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.number())
    }
}

/// One neighborhood in the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub name: String,
    pub city: String,
    pub tier: Tier,
    /// Base rate in INR per square foot, before inflation and tier adjustment
    pub base_rate: f64,
    pub is_high_demand: bool,
    /// Proximity to the nearest IT/employment hub, 0 to 1
    pub proximity_to_it: f64,
}

impl Locality {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        tier: Tier,
        base_rate: f64,
        is_high_demand: bool,
        proximity_to_it: f64,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            tier,
            base_rate,
            is_high_demand,
            proximity_to_it,
        }
    }

    /// Lowercase, dash-separated form of the name used in listing ids
    pub fn slug(&self) -> String {
        self.name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Immutable, non-empty set of localities keyed by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalityTable {
    entries: Vec<Locality>,
}

impl LocalityTable {
    /// Build a table, checking every entry.
    ///
    /// The first entry is the fallback for unknown names.
    pub fn new(entries: Vec<Locality>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ValuationError::ConfigError(
                "locality table must contain at least one entry".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(ValuationError::ConfigError(
                    "locality name must not be empty".to_string(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ValuationError::ConfigError(format!(
                    "duplicate locality: {}",
                    entry.name
                )));
            }
            if !entry.base_rate.is_finite() || entry.base_rate <= 0.0 {
                return Err(ValuationError::ConfigError(format!(
                    "{} has a non-positive base rate",
                    entry.name
                )));
            }
            if !(0.0..=1.0).contains(&entry.proximity_to_it) {
                return Err(ValuationError::ConfigError(format!(
                    "{} has proximity_to_it outside [0, 1]",
                    entry.name
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Load a table from a JSON array of localities
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<Locality> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file holding an array of localities
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The built-in South India table used by the product
    pub fn south_india() -> Self {
        use Tier::{Emerging, Mid, Premium};

        let entries = vec![
            Locality::new("Gachibowli", "Hyderabad", Premium, 9_500.0, true, 0.95),
            Locality::new("Banjara Hills", "Hyderabad", Premium, 14_500.0, true, 0.70),
            Locality::new("Jubilee Hills", "Hyderabad", Premium, 16_000.0, true, 0.72),
            Locality::new("Kondapur", "Hyderabad", Mid, 8_200.0, true, 0.90),
            Locality::new("Whitefield", "Bangalore", Premium, 9_200.0, true, 0.92),
            Locality::new("Indiranagar", "Bangalore", Premium, 15_500.0, true, 0.75),
            Locality::new("Electronic City", "Bangalore", Mid, 6_200.0, false, 0.88),
            Locality::new("Sarjapur Road", "Bangalore", Mid, 7_800.0, true, 0.85),
            Locality::new("Kakkanad", "Kochi", Emerging, 5_600.0, false, 0.80),
            Locality::new("Tellapur", "Hyderabad", Mid, 7_200.0, true, 0.82),
            Locality::new("OMR", "Chennai", Mid, 6_800.0, false, 0.86),
            Locality::new("Anna Nagar", "Chennai", Premium, 13_500.0, false, 0.60),
            Locality::new("Kompally", "Hyderabad", Emerging, 5_200.0, false, 0.45),
        ];

        Self { entries }
    }

    /// Exact-name lookup
    pub fn find(&self, name: &str) -> Option<&Locality> {
        self.entries.iter().find(|l| l.name == name)
    }

    /// Exact-name lookup falling back to the first entry
    pub fn resolve(&self, name: &str) -> &Locality {
        self.find(name).unwrap_or_else(|| self.default_locality())
    }

    /// The fallback locality (first entry)
    pub fn default_locality(&self) -> &Locality {
        &self.entries[0]
    }

    /// Case-insensitive substring search over name and city.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Locality> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|l| {
                l.name.to_lowercase().contains(&needle) || l.city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locality> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, tables are non-empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LocalityTable {
    fn default() -> Self {
        Self::south_india()
    }
}
