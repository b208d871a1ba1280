//! Session Store
//!
//! The explicit client-state container: wizard progress, cart holds, and
//! checkout form state for one browsing session. The host UI persists the
//! serialized payload under [`STORAGE_KEY`] so state survives reloads, and
//! passes the store instance explicitly; there is no ambient singleton.

use std::io::{self, Read, Write};

use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::Cart, checkout::CheckoutForm, wizard::SubmissionWizard};

/// Storage key the host UI keeps the serialized session under.
pub const STORAGE_KEY: &str = "waypoint.session.v1";

/// Errors that can occur while persisting or restoring a session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing the session payload.
    #[error("failed to read or write session payload")]
    Io(#[from] io::Error),

    /// The session payload could not be encoded or decoded.
    #[error("failed to encode or decode session payload")]
    Json(#[from] serde_json::Error),
}

/// All client-held state for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    wizard: SubmissionWizard,
    cart: Cart,
    checkout: CheckoutForm,
}

impl Session {
    /// Creates a fresh session with an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            wizard: SubmissionWizard::new(),
            cart: Cart::new(currency),
            checkout: CheckoutForm::new(),
        }
    }

    /// The listing submission wizard.
    #[must_use]
    pub fn wizard(&self) -> &SubmissionWizard {
        &self.wizard
    }

    /// The listing submission wizard, mutably.
    pub fn wizard_mut(&mut self) -> &mut SubmissionWizard {
        &mut self.wizard
    }

    /// The cart of held bookings.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart of held bookings, mutably.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The checkout form.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutForm {
        &self.checkout
    }

    /// The checkout form, mutably.
    pub fn checkout_mut(&mut self) -> &mut CheckoutForm {
        &mut self.checkout
    }

    /// Serializes the session to a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a session from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the payload cannot be decoded.
    pub fn from_json(payload: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Writes the serialized session to a writer.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or writing fails.
    pub fn save_to(&self, mut writer: impl Write) -> Result<(), StoreError> {
        let payload = self.to_json()?;

        writer.write_all(payload.as_bytes())?;

        Ok(())
    }

    /// Restores a session from a reader.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if reading or decoding fails.
    pub fn load_from(mut reader: impl Read) -> Result<Self, StoreError> {
        let mut payload = String::new();

        reader.read_to_string(&mut payload)?;

        Self::from_json(&payload)
    }

    /// Restores a session from a reader, falling back to a fresh session
    /// when the payload is missing or corrupt.
    #[must_use]
    pub fn load_or_default(reader: impl Read, currency: &'static Currency) -> Self {
        Self::load_from(reader).unwrap_or_else(|_| Self::new(currency))
    }
}
