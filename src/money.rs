//! Money
//!
//! Conversion between major-unit decimal amounts (e.g. euros) and the
//! integer minor units (cents) used for all stored arithmetic.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Errors that can occur while converting between major and minor units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount carries more than two fractional digits, so it cannot be
    /// represented exactly in minor units.
    #[error("amount {0} has sub-cent precision")]
    Precision(Decimal),

    /// The amount does not fit in an `i64` minor unit count.
    #[error("amount does not fit in minor units")]
    Overflow,
}

/// Converts a major-unit decimal amount to integer minor units.
///
/// The conversion is exact: `12.34` becomes `1234`.
///
/// # Errors
///
/// - [`AmountError::Precision`]: The amount has more than two fractional digits.
/// - [`AmountError::Overflow`]: The scaled amount does not fit in an `i64`.
pub fn minor_units(major: Decimal) -> Result<i64, AmountError> {
    let scaled = major
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(AmountError::Overflow)?;

    if !scaled.fract().is_zero() {
        return Err(AmountError::Precision(major));
    }

    scaled.to_i64().ok_or(AmountError::Overflow)
}

/// Converts integer minor units to a major-unit decimal amount.
///
/// The exact inverse of [`minor_units`] for every `i64`: `1234` becomes `12.34`.
#[must_use]
pub fn major_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Serde adapter for `&'static rusty_money::iso::Currency` fields, stored as
/// the ISO alpha code (e.g. `"EUR"`).
pub mod currency_code {
    use rusty_money::iso::{self, Currency};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serializes a currency as its ISO alpha code.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(currency: &&'static Currency, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(currency.iso_alpha_code)
    }

    /// Deserializes a currency from its ISO alpha code.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error for unknown codes.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<&'static Currency, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;

        iso::find(&code).ok_or_else(|| de::Error::custom(format!("unknown currency code: {code}")))
    }
}
