//! Commission rate fixture deserialization

use decimal_percentage::Percentage;
use serde::Deserialize;

use crate::commission::{CommissionError, CommissionRates};

/// The deserialized shape of a `rates.yaml` fixture file.
#[derive(Debug, Deserialize)]
pub struct RatesFixture {
    /// Platform rate as a decimal fraction (e.g. 0.10 for 10%)
    pub platform: f64,

    /// Provider rate as a decimal fraction (e.g. 0.85 for 85%)
    pub provider: f64,

    /// Host rate as a decimal fraction (e.g. 0.05 for 5%)
    pub host: f64,
}

impl RatesFixture {
    /// Converts the fixture into a validated rate policy.
    ///
    /// # Errors
    ///
    /// Returns [`CommissionError::RatesDoNotSum`] unless the rates sum to
    /// exactly 100%.
    pub fn commission_rates(&self) -> Result<CommissionRates, CommissionError> {
        CommissionRates::new(
            Percentage::from(self.platform),
            Percentage::from(self.provider),
            Percentage::from(self.host),
        )
    }
}
