//! Checkout
//!
//! Incremental accumulation of the personal, payment, and billing records a
//! booking purchase needs, with per-field validation errors. The form is
//! submittable only once every required leaf field is present and valid,
//! and the cart's holds are still live.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::cart::{CartError, HoldCountdown};

/// Errors related to checkout submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Required fields are missing or failed validation.
    #[error("missing or invalid required fields: {0:?}")]
    MissingFields(SmallVec<[FieldId; 13]>),

    /// The cart expired before checkout completed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Identity of one leaf field across the three checkout sub-records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Personal: first name.
    FirstName,

    /// Personal: last name.
    LastName,

    /// Personal: email address.
    Email,

    /// Personal: phone number.
    Phone,

    /// Payment: name on the card.
    CardholderName,

    /// Payment: card number.
    CardNumber,

    /// Payment: expiry month (1-12).
    ExpiryMonth,

    /// Payment: four-digit expiry year.
    ExpiryYear,

    /// Payment: card security code.
    SecurityCode,

    /// Billing: first address line.
    AddressLine1,

    /// Billing: second address line (optional).
    AddressLine2,

    /// Billing: city.
    City,

    /// Billing: postal code.
    PostalCode,

    /// Billing: country.
    Country,
}

impl FieldId {
    /// Every required leaf field, in display order.
    ///
    /// [`FieldId::AddressLine2`] is the one optional leaf and is excluded.
    pub const REQUIRED: [FieldId; 13] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::CardholderName,
        FieldId::CardNumber,
        FieldId::ExpiryMonth,
        FieldId::ExpiryYear,
        FieldId::SecurityCode,
        FieldId::AddressLine1,
        FieldId::City,
        FieldId::PostalCode,
        FieldId::Country,
    ];
}

/// Personal details sub-record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    /// First name.
    pub first_name: Option<String>,

    /// Last name.
    pub last_name: Option<String>,

    /// Email address.
    pub email: Option<String>,

    /// Phone number.
    pub phone: Option<String>,
}

/// Payment details sub-record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Name on the card.
    pub cardholder_name: Option<String>,

    /// Card number with spaces stripped.
    pub card_number: Option<String>,

    /// Expiry month (1-12).
    pub expiry_month: Option<String>,

    /// Four-digit expiry year.
    pub expiry_year: Option<String>,

    /// Card security code.
    pub security_code: Option<String>,
}

/// Billing address sub-record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    /// First address line.
    pub address_line1: Option<String>,

    /// Second address line (optional).
    pub address_line2: Option<String>,

    /// City.
    pub city: Option<String>,

    /// Postal code.
    pub postal_code: Option<String>,

    /// Country.
    pub country: Option<String>,
}

/// The assembled result of a submittable checkout form, ready to hand to
/// the external payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSubmission {
    /// Personal details with every required leaf present.
    pub personal: PersonalDetails,

    /// Payment details with every required leaf present.
    pub payment: PaymentDetails,

    /// Billing address with every required leaf present.
    pub billing: BillingAddress,
}

/// Checkout form state, accumulated one field edit at a time.
///
/// Validation messages are transient UI state and are not persisted; they
/// are rebuilt as the user edits.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CheckoutForm {
    /// Personal details captured so far.
    personal: PersonalDetails,

    /// Payment details captured so far.
    payment: PaymentDetails,

    /// Billing address captured so far.
    billing: BillingAddress,

    #[serde(skip)]
    errors: FxHashMap<FieldId, String>,
}

impl CheckoutForm {
    /// Creates an empty checkout form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The personal details captured so far.
    #[must_use]
    pub fn personal(&self) -> &PersonalDetails {
        &self.personal
    }

    /// The payment details captured so far.
    #[must_use]
    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    /// The billing address captured so far.
    #[must_use]
    pub fn billing(&self) -> &BillingAddress {
        &self.billing
    }

    /// The current validation message for a field, if its last edit failed.
    #[must_use]
    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Applies one field edit.
    ///
    /// A valid value is normalized and stored, clearing any previous error
    /// for the field. An invalid value clears the stored field and records
    /// a validation message instead.
    pub fn set_field(&mut self, field: FieldId, value: &str) {
        match validate(field, value) {
            Ok(normalized) => {
                self.store(field, normalized);
                self.errors.remove(&field);
            }
            Err(message) => {
                self.store(field, None);
                self.errors.insert(field, message);
            }
        }
    }

    /// Required leaves that have not captured a valid value yet.
    #[must_use]
    pub fn missing_fields(&self) -> SmallVec<[FieldId; 13]> {
        FieldId::REQUIRED
            .into_iter()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    /// Whether every required leaf is present and no field has a pending
    /// validation error.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty() && self.errors.is_empty()
    }

    /// Assembles the final submission for the external payment collaborator.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Cart`]: The cart's earliest hold has lapsed.
    /// - [`CheckoutError::MissingFields`]: Required fields are absent or invalid.
    pub fn submit(&self, countdown: &HoldCountdown) -> Result<CheckoutSubmission, CheckoutError> {
        countdown.ensure_live()?;

        let missing = self.missing_fields();

        if missing.is_empty() && self.errors.is_empty() {
            Ok(CheckoutSubmission {
                personal: self.personal.clone(),
                payment: self.payment.clone(),
                billing: self.billing.clone(),
            })
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }

    /// The stored value for a field.
    fn value(&self, field: FieldId) -> Option<&String> {
        match field {
            FieldId::FirstName => self.personal.first_name.as_ref(),
            FieldId::LastName => self.personal.last_name.as_ref(),
            FieldId::Email => self.personal.email.as_ref(),
            FieldId::Phone => self.personal.phone.as_ref(),
            FieldId::CardholderName => self.payment.cardholder_name.as_ref(),
            FieldId::CardNumber => self.payment.card_number.as_ref(),
            FieldId::ExpiryMonth => self.payment.expiry_month.as_ref(),
            FieldId::ExpiryYear => self.payment.expiry_year.as_ref(),
            FieldId::SecurityCode => self.payment.security_code.as_ref(),
            FieldId::AddressLine1 => self.billing.address_line1.as_ref(),
            FieldId::AddressLine2 => self.billing.address_line2.as_ref(),
            FieldId::City => self.billing.city.as_ref(),
            FieldId::PostalCode => self.billing.postal_code.as_ref(),
            FieldId::Country => self.billing.country.as_ref(),
        }
    }

    /// Stores (or clears) the value for a field.
    fn store(&mut self, field: FieldId, value: Option<String>) {
        let slot = match field {
            FieldId::FirstName => &mut self.personal.first_name,
            FieldId::LastName => &mut self.personal.last_name,
            FieldId::Email => &mut self.personal.email,
            FieldId::Phone => &mut self.personal.phone,
            FieldId::CardholderName => &mut self.payment.cardholder_name,
            FieldId::CardNumber => &mut self.payment.card_number,
            FieldId::ExpiryMonth => &mut self.payment.expiry_month,
            FieldId::ExpiryYear => &mut self.payment.expiry_year,
            FieldId::SecurityCode => &mut self.payment.security_code,
            FieldId::AddressLine1 => &mut self.billing.address_line1,
            FieldId::AddressLine2 => &mut self.billing.address_line2,
            FieldId::City => &mut self.billing.city,
            FieldId::PostalCode => &mut self.billing.postal_code,
            FieldId::Country => &mut self.billing.country,
        };

        *slot = value;
    }
}

/// Validates and normalizes one field edit.
///
/// Returns the value to store, or a message describing why the edit was
/// rejected. A blank optional field is stored as absent without an error.
fn validate(field: FieldId, value: &str) -> Result<Option<String>, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return if field == FieldId::AddressLine2 {
            Ok(None)
        } else {
            Err("required".to_string())
        };
    }

    match field {
        FieldId::Email => {
            if trimmed.contains('@') {
                Ok(Some(trimmed.to_string()))
            } else {
                Err("must be a valid email address".to_string())
            }
        }
        FieldId::CardNumber => {
            let digits: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

            if digits.len() >= 12 && digits.len() <= 19 && digits.chars().all(|c| c.is_ascii_digit())
            {
                Ok(Some(digits))
            } else {
                Err("must be 12-19 digits".to_string())
            }
        }
        FieldId::ExpiryMonth => match trimmed.parse::<u8>() {
            Ok(month) if (1..=12).contains(&month) => Ok(Some(trimmed.to_string())),
            _ => Err("must be a month between 1 and 12".to_string()),
        },
        FieldId::ExpiryYear => {
            if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
                Ok(Some(trimmed.to_string()))
            } else {
                Err("must be a four-digit year".to_string())
            }
        }
        FieldId::SecurityCode => {
            if (3..=4).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_digit()) {
                Ok(Some(trimmed.to_string()))
            } else {
                Err("must be 3 or 4 digits".to_string())
            }
        }
        _ => Ok(Some(trimmed.to_string())),
    }
}
