//! Commission
//!
//! Splits a gross charge across the three parties of a booking: the
//! platform, the service provider, and an optional referring host.
//!
//! The provider and host shares are rounded to the nearest minor unit with
//! ties away from zero (documented policy choice). The platform fee is
//! derived by subtraction, never rounded independently, so the three shares
//! always sum to exactly the charged total.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to commission calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommissionError {
    /// The total charge is negative; no breakdown is produced.
    #[error("total charge of {0} minor units is negative")]
    InvalidAmount(i64),

    /// Custom rates do not sum to exactly 100%.
    #[error("commission rates must sum to exactly 100%")]
    RatesDoNotSum,

    /// A share could not be safely represented in minor units.
    #[error("share calculation overflowed minor units")]
    ShareOverflow,
}

/// Commission policy: the percentage of a gross charge owed to each party.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionRates {
    platform: Percentage,
    provider: Percentage,
    host: Percentage,
}

impl Default for CommissionRates {
    /// The standard marketplace policy: platform 10%, provider 85%, host 5%.
    fn default() -> Self {
        Self {
            platform: Percentage::from(0.10),
            provider: Percentage::from(0.85),
            host: Percentage::from(0.05),
        }
    }
}

impl CommissionRates {
    /// Creates a custom rate policy.
    ///
    /// # Errors
    ///
    /// Returns [`CommissionError::RatesDoNotSum`] unless the three rates sum
    /// to exactly 100%.
    pub fn new(
        platform: Percentage,
        provider: Percentage,
        host: Percentage,
    ) -> Result<Self, CommissionError> {
        let sum = (platform * Decimal::ONE) + (provider * Decimal::ONE) + (host * Decimal::ONE);

        if sum == Decimal::ONE {
            Ok(Self {
                platform,
                provider,
                host,
            })
        } else {
            Err(CommissionError::RatesDoNotSum)
        }
    }

    /// The platform's rate.
    #[must_use]
    pub fn platform(&self) -> Percentage {
        self.platform
    }

    /// The provider's rate.
    #[must_use]
    pub fn provider(&self) -> Percentage {
        self.provider
    }

    /// The host's rate (only charged when a host participates).
    #[must_use]
    pub fn host(&self) -> Percentage {
        self.host
    }

    /// Splits a total charge into platform, provider, and host shares.
    ///
    /// The provider and host shares are rounded to the nearest minor unit;
    /// the platform fee is the exact remainder. When `has_host` is false the
    /// host share is zero and its portion folds into the platform fee.
    ///
    /// # Errors
    ///
    /// - [`CommissionError::InvalidAmount`]: The total is negative.
    /// - [`CommissionError::ShareOverflow`]: A share cannot be represented in minor units.
    pub fn split<'a>(
        &self,
        total: &Money<'a, Currency>,
        has_host: bool,
    ) -> Result<CommissionBreakdown<'a>, CommissionError> {
        let total_minor = total.to_minor_units();

        if total_minor < 0 {
            return Err(CommissionError::InvalidAmount(total_minor));
        }

        let provider_amount = share_of_minor(self.provider, total_minor)?;

        let host_amount = if has_host {
            share_of_minor(self.host, total_minor)?
        } else {
            0
        };

        // Derived by subtraction so the sum invariant holds for every input.
        let platform_fee = total_minor - provider_amount - host_amount;

        let currency = total.currency();

        Ok(CommissionBreakdown {
            platform_fee: Money::from_minor(platform_fee, currency),
            provider_amount: Money::from_minor(provider_amount, currency),
            host_amount: Money::from_minor(host_amount, currency),
        })
    }
}

/// Immutable result of allocating a charge across the three parties.
///
/// Computed fresh for each payment-intent creation; never stored or mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionBreakdown<'a> {
    platform_fee: Money<'a, Currency>,
    provider_amount: Money<'a, Currency>,
    host_amount: Money<'a, Currency>,
}

impl<'a> CommissionBreakdown<'a> {
    /// The platform's fee (absorbs the rounding remainder).
    #[must_use]
    pub fn platform_fee(&self) -> Money<'a, Currency> {
        self.platform_fee
    }

    /// The provider's share.
    #[must_use]
    pub fn provider_amount(&self) -> Money<'a, Currency> {
        self.provider_amount
    }

    /// The host's share; zero when no host participates.
    #[must_use]
    pub fn host_amount(&self) -> Money<'a, Currency> {
        self.host_amount
    }

    /// Recomputes the charged total from the three shares.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the addition fails; all shares carry the
    /// same currency by construction, so this only surfaces arithmetic faults.
    pub fn total(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.platform_fee
            .add(self.provider_amount)?
            .add(self.host_amount)
    }
}

/// Calculates a rounded share of a minor unit amount.
///
/// Rounds to the nearest minor unit with ties away from zero.
fn share_of_minor(rate: Percentage, minor: i64) -> Result<i64, CommissionError> {
    let share = rate * Decimal::from(minor);
    let rounded = share.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().ok_or(CommissionError::ShareOverflow)
}
