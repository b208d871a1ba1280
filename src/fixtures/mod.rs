//! Fixtures
//!
//! YAML-driven sample catalogs and cart holds for the demo CLI and
//! integration tests.

use std::{fs, path::PathBuf};

use jiff::{Timestamp, ToSpan};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    commission::{CommissionError, CommissionRates},
    fixtures::{holds::HoldsFixture, listings::ListingsFixture, rates::RatesFixture},
    listings::Listing,
    money::{self, AmountError},
};

pub mod holds;
pub mod listings;
pub mod rates;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] AmountError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A hold references a listing missing from the catalog
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    /// Hold expiry arithmetic failed
    #[error("Invalid hold duration: {0}")]
    HoldDuration(#[from] jiff::Error),

    /// Commission rates in the fixture are invalid
    #[error("Invalid commission rates: {0}")]
    InvalidRates(#[from] CommissionError),
}

/// A loaded fixture set: a listing catalog plus a list of cart holds.
#[derive(Debug)]
pub struct Fixture {
    listings: FxHashMap<String, Listing<'static>>,
    holds: Vec<holds::HoldFixture>,
    rates: CommissionRates,
    currency: &'static Currency,
}

impl Fixture {
    /// Loads the named fixture set from the default `./fixtures` directory.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if a fixture file cannot be read or parsed.
    pub fn from_set(set: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", set)
    }

    /// Loads the named fixture set from a custom base directory.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if a fixture file cannot be read or parsed.
    pub fn from_set_in(base_path: &str, set: &str) -> Result<Self, FixtureError> {
        let set_path = PathBuf::from(base_path).join(set);

        let listings_fixture: ListingsFixture =
            serde_norway::from_str(&fs::read_to_string(set_path.join("listings.yaml"))?)?;

        let holds_fixture: HoldsFixture =
            serde_norway::from_str(&fs::read_to_string(set_path.join("holds.yaml"))?)?;

        let rates_fixture: RatesFixture =
            serde_norway::from_str(&fs::read_to_string(set_path.join("rates.yaml"))?)?;

        let currency = iso::find(&listings_fixture.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(listings_fixture.currency.clone()))?;

        let mut listings = FxHashMap::default();

        for (id, listing) in listings_fixture.listings {
            let price_minor = money::minor_units(listing.price_per_person)?;

            listings.insert(
                id,
                Listing {
                    name: listing.name,
                    location: listing.location,
                    price_per_person: Money::from_minor(price_minor, currency),
                    hosted: listing.hosted,
                },
            );
        }

        Ok(Self {
            listings,
            holds: holds_fixture.holds,
            rates: rates_fixture.commission_rates()?,
            currency,
        })
    }

    /// The listing catalog, keyed by listing id.
    #[must_use]
    pub fn listings(&self) -> &FxHashMap<String, Listing<'static>> {
        &self.listings
    }

    /// The commission rate policy of the fixture set.
    #[must_use]
    pub fn rates(&self) -> CommissionRates {
        self.rates
    }

    /// The currency of the fixture set.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Whether any held listing involves a referring host.
    #[must_use]
    pub fn any_hosted(&self) -> bool {
        self.holds.iter().any(|hold| {
            self.listings
                .get(&hold.listing)
                .is_some_and(|listing| listing.hosted)
        })
    }

    /// Builds a cart with one held booking per hold fixture, with each hold
    /// expiring `hold_minutes` after `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if a hold references an unknown listing or
    /// the expiry arithmetic fails.
    pub fn cart(&self, now: Timestamp) -> Result<Cart, FixtureError> {
        let mut cart = Cart::new(self.currency);

        for hold in &self.holds {
            let listing = self
                .listings
                .get(&hold.listing)
                .ok_or_else(|| FixtureError::ListingNotFound(hold.listing.clone()))?;

            let price_minor =
                listing.price_per_person.to_minor_units() * i64::from(hold.party_size);

            cart.add(CartItem {
                listing_id: hold.listing.clone(),
                expires_at: now.checked_add(hold.hold_minutes.minutes())?,
                start_date: hold.start_date,
                end_date: hold.end_date,
                party_size: hold.party_size,
                price_minor,
            });
        }

        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn loads_coastal_fixture_set() -> TestResult {
        let fixture = Fixture::from_set("coastal")?;

        assert!(!fixture.listings().is_empty());
        assert_eq!(fixture.currency().iso_alpha_code, "EUR");
        assert_eq!(fixture.rates(), CommissionRates::default());
        assert!(fixture.any_hosted());

        Ok(())
    }

    #[test]
    fn builds_cart_with_priced_holds() -> TestResult {
        let fixture = Fixture::from_set("coastal")?;
        let now = Timestamp::from_second(1_780_000_000)?;

        let cart = fixture.cart(now)?;

        assert!(!cart.is_empty());
        assert!(cart.subtotal().to_minor_units() > 0);
        assert!(cart.earliest_expiry().is_some_and(|expiry| expiry > now));

        Ok(())
    }

    #[test]
    fn unknown_set_fails_with_io_error() {
        let result = Fixture::from_set("no-such-set");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
