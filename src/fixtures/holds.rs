//! Hold Fixtures

use jiff::civil::Date;
use serde::Deserialize;

/// Wrapper for cart holds in YAML
#[derive(Debug, Deserialize)]
pub struct HoldsFixture {
    /// Holds to place in the cart
    pub holds: Vec<HoldFixture>,
}

/// One held booking from YAML
#[derive(Debug, Deserialize)]
pub struct HoldFixture {
    /// Listing id the hold is against
    pub listing: String,

    /// First day of the booked activity or stay
    pub start_date: Date,

    /// Last day of the booked activity or stay
    pub end_date: Date,

    /// Number of people in the party
    pub party_size: u32,

    /// Minutes from now until the hold lapses
    pub hold_minutes: i64,
}
