//! Valuation request

use serde::{Deserialize, Serialize};

/// Fewest rooms the form allows
pub const MIN_BHK: u32 = 1;
/// Most rooms the form allows
pub const MAX_BHK: u32 = 10;

/// What the caller wants valued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseQuery {
    /// Floor area in square feet
    pub sqft: u32,
    /// Room configuration (bedroom count)
    pub bhk: u32,
    pub bathrooms: u32,
    /// Locality name; unknown names fall back to the table default
    pub neighborhood: String,
}

impl HouseQuery {
    pub fn new(sqft: u32, bhk: u32, bathrooms: u32, neighborhood: impl Into<String>) -> Self {
        Self {
            sqft,
            bhk,
            bathrooms,
            neighborhood: neighborhood.into(),
        }
    }

    /// Set the room count, clamped to what the form allows
    pub fn with_bhk(mut self, bhk: u32) -> Self {
        self.bhk = bhk.clamp(MIN_BHK, MAX_BHK);
        self
    }

    pub fn with_sqft(mut self, sqft: u32) -> Self {
        self.sqft = sqft;
        self
    }

    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = bathrooms;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = neighborhood.into();
        self
    }

    pub fn increment_bhk(&mut self) {
        self.bhk = self.bhk.saturating_add(1).clamp(MIN_BHK, MAX_BHK);
    }

    pub fn decrement_bhk(&mut self) {
        self.bhk = self.bhk.saturating_sub(1).clamp(MIN_BHK, MAX_BHK);
    }
}

impl Default for HouseQuery {
    /// The form's initial state: a 2400 sqft 3 BHK in Tellapur
    fn default() -> Self {
        Self::new(2400, 3, 3, "Tellapur")
    }
}
