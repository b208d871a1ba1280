//! Listing Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for a listing catalog in YAML
#[derive(Debug, Deserialize)]
pub struct ListingsFixture {
    /// ISO alpha code for every price in the set
    pub currency: String,

    /// Map of listing id -> listing fixture
    pub listings: FxHashMap<String, ListingFixture>,
}

/// Listing fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ListingFixture {
    /// Listing name
    pub name: String,

    /// Location name
    pub location: String,

    /// Price per person in major units (e.g. `45.00`)
    pub price_per_person: Decimal,

    /// Whether a referring host takes a share of this listing's bookings
    #[serde(default)]
    pub hosted: bool,
}
