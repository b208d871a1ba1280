//! Listings

use rusty_money::{Money, iso::Currency};

/// Catalog metadata for a bookable listing, keyed by the external
/// marketplace's listing id.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    /// Listing name
    pub name: String,

    /// Location name
    pub location: String,

    /// Price per person
    pub price_per_person: Money<'a, Currency>,

    /// Whether a referring host takes a share of this listing's bookings
    pub hosted: bool,
}
