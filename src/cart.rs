//! Cart
//!
//! Held-but-unpurchased bookings. Each item carries the absolute expiry of
//! the temporary hold granted by the external booking engine; the cart as a
//! whole is considered expired once its earliest-expiring hold lapses.

use jiff::{Timestamp, civil::Date};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::money::currency_code;

new_key_type! {
    /// Cart Item Key
    pub struct CartItemKey;
}

/// Errors related to cart contents and hold expiry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item was not found in the cart.
    #[error("cart item {0:?} not found")]
    ItemNotFound(CartItemKey),

    /// The earliest hold in the cart has lapsed; checkout is blocked until
    /// holds are re-acquired from the external booking engine.
    #[error("a hold in the cart has expired")]
    CartExpired,
}

/// One held-but-unpurchased booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Reference to the listing in the external marketplace.
    pub listing_id: String,

    /// When the hold granted by the booking engine lapses.
    pub expires_at: Timestamp,

    /// First day of the booked activity or stay.
    pub start_date: Date,

    /// Last day of the booked activity or stay.
    pub end_date: Date,

    /// Number of people in the party.
    pub party_size: u32,

    /// Price for the whole party in minor currency units.
    pub price_minor: i64,
}

/// The collection of held bookings for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    items: SlotMap<CartItemKey, CartItem>,

    #[serde(with = "currency_code")]
    currency: &'static Currency,
}

impl Cart {
    /// Creates an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: SlotMap::with_key(),
            currency,
        }
    }

    /// Adds a held booking and returns its key.
    pub fn add(&mut self, item: CartItem) -> CartItemKey {
        self.items.insert(item)
    }

    /// Removes a held booking.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the key is not in the cart.
    pub fn remove(&mut self, key: CartItemKey) -> Result<CartItem, CartError> {
        self.items.remove(key).ok_or(CartError::ItemNotFound(key))
    }

    /// Gets a held booking by key.
    #[must_use]
    pub fn get(&self, key: CartItemKey) -> Option<&CartItem> {
        self.items.get(key)
    }

    /// Removes every item from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the held bookings.
    pub fn iter(&self) -> impl Iterator<Item = (CartItemKey, &CartItem)> {
        self.items.iter()
    }

    /// The number of held bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no bookings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The currency all item prices are denominated in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The sum of all item prices.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        let total_minor: i64 = self.items.values().map(|item| item.price_minor).sum();

        Money::from_minor(total_minor, self.currency)
    }

    /// The expiry of the earliest-expiring hold, or `None` when empty.
    #[must_use]
    pub fn earliest_expiry(&self) -> Option<Timestamp> {
        self.items.values().map(|item| item.expires_at).min()
    }
}

/// Status of the hold countdown after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// No holds are being tracked; nothing counts down.
    Idle,

    /// All tracked holds are still live.
    Running,

    /// The earliest hold has lapsed.
    Expired,
}

/// Countdown over the earliest hold expiry in a cart.
///
/// The owning view drives this on a fixed polling interval (one tick per
/// second is typical, and bounds precision to ±1s). Ticking stops once the
/// countdown expires or the cart empties; any cart change restarts tracking
/// from scratch via [`HoldCountdown::sync`]. The clock is passed into each
/// call, so there is no timer to leak on teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldCountdown {
    earliest_expiry: Option<Timestamp>,
    has_expired: bool,
}

impl HoldCountdown {
    /// Creates an idle countdown tracking nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the tracked expiry from the cart's current contents.
    ///
    /// An empty cart leaves the countdown idle. A previous expiry flag is
    /// cleared: changing the cart restarts tracking from scratch.
    pub fn sync(&mut self, cart: &Cart) {
        self.earliest_expiry = cart.earliest_expiry();
        self.has_expired = false;
    }

    /// Advances the countdown to `now`.
    ///
    /// Once expired, further ticks are no-ops until the next
    /// [`HoldCountdown::sync`].
    pub fn tick(&mut self, now: Timestamp) -> CountdownStatus {
        let Some(expiry) = self.earliest_expiry else {
            return CountdownStatus::Idle;
        };

        if self.has_expired {
            return CountdownStatus::Expired;
        }

        if now > expiry {
            self.has_expired = true;

            CountdownStatus::Expired
        } else {
            CountdownStatus::Running
        }
    }

    /// Whether the earliest tracked hold has lapsed.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.has_expired
    }

    /// Whether the countdown is tracking anything.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.earliest_expiry.is_none()
    }

    /// The remaining time formatted as `M:SS`, clamped at `0:00`.
    ///
    /// Returns an empty string while idle.
    #[must_use]
    pub fn time_left(&self, now: Timestamp) -> String {
        let Some(expiry) = self.earliest_expiry else {
            return String::new();
        };

        let seconds = expiry.duration_since(now).as_secs().max(0);

        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    /// Fails checkout progression while the cart is expired.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CartExpired`] once the earliest hold has lapsed.
    pub fn ensure_live(&self) -> Result<(), CartError> {
        if self.has_expired {
            Err(CartError::CartExpired)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, civil::date};
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    fn hold(listing_id: &str, expires_at: Timestamp, price_minor: i64) -> CartItem {
        CartItem {
            listing_id: listing_id.to_string(),
            expires_at,
            start_date: date(2026, 7, 10),
            end_date: date(2026, 7, 12),
            party_size: 2,
            price_minor,
        }
    }

    fn base_time() -> Result<Timestamp, jiff::Error> {
        Timestamp::from_second(1_780_000_000)
    }

    #[test]
    fn subtotal_sums_item_prices() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        cart.add(hold("kayak-tour", now.checked_add(10.minutes())?, 4500));
        cart.add(hold("wine-tasting", now.checked_add(5.minutes())?, 6200));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal(), Money::from_minor(10_700, EUR));

        Ok(())
    }

    #[test]
    fn earliest_expiry_is_minimum_over_items() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        let soon = now.checked_add(5.minutes())?;

        cart.add(hold("kayak-tour", now.checked_add(10.minutes())?, 4500));
        cart.add(hold("wine-tasting", soon, 6200));

        assert_eq!(cart.earliest_expiry(), Some(soon));

        Ok(())
    }

    #[test]
    fn remove_returns_item_and_rejects_unknown_keys() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        let key = cart.add(hold("kayak-tour", now.checked_add(10.minutes())?, 4500));

        let removed = cart.remove(key)?;
        assert_eq!(removed.listing_id, "kayak-tour");

        assert_eq!(cart.remove(key), Err(CartError::ItemNotFound(key)));

        Ok(())
    }

    #[test]
    fn empty_cart_yields_idle_countdown_and_empty_display() {
        let cart = Cart::new(EUR);
        let mut countdown = HoldCountdown::new();

        countdown.sync(&cart);

        let now = Timestamp::UNIX_EPOCH;

        assert!(countdown.is_idle());
        assert_eq!(countdown.tick(now), CountdownStatus::Idle);
        assert_eq!(countdown.time_left(now), "");
        assert!(!countdown.has_expired());
    }

    #[test]
    fn countdown_expires_once_earliest_hold_lapses() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        cart.add(hold("kayak-tour", now.checked_add(2.seconds())?, 4500));

        let mut countdown = HoldCountdown::new();
        countdown.sync(&cart);

        assert_eq!(countdown.tick(now), CountdownStatus::Running);
        assert_eq!(countdown.time_left(now), "0:02");

        let later = now.checked_add(3.seconds())?;
        assert_eq!(countdown.tick(later), CountdownStatus::Expired);
        assert!(countdown.has_expired());
        assert_eq!(countdown.time_left(later), "0:00");

        // Expiry is sticky until the item collection changes.
        let much_later = now.checked_add(10.minutes())?;
        assert_eq!(countdown.tick(much_later), CountdownStatus::Expired);
        assert!(countdown.has_expired());

        Ok(())
    }

    #[test]
    fn sync_after_cart_change_restarts_tracking() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        cart.add(hold("kayak-tour", now.checked_add(1.seconds())?, 4500));

        let mut countdown = HoldCountdown::new();
        countdown.sync(&cart);

        let later = now.checked_add(5.seconds())?;
        assert_eq!(countdown.tick(later), CountdownStatus::Expired);

        // A fresh hold replaces the lapsed one; tracking restarts.
        cart.clear();
        cart.add(hold("wine-tasting", now.checked_add(20.minutes())?, 6200));
        countdown.sync(&cart);

        assert!(!countdown.has_expired());
        assert_eq!(countdown.tick(later), CountdownStatus::Running);
        countdown.ensure_live()?;

        Ok(())
    }

    #[test]
    fn time_left_formats_minutes_and_seconds() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        cart.add(hold("kayak-tour", now.checked_add(247.seconds())?, 4500));

        let mut countdown = HoldCountdown::new();
        countdown.sync(&cart);

        assert_eq!(countdown.time_left(now), "4:07");

        Ok(())
    }

    #[test]
    fn ensure_live_blocks_checkout_after_expiry() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        cart.add(hold("kayak-tour", now.checked_add(1.seconds())?, 4500));

        let mut countdown = HoldCountdown::new();
        countdown.sync(&cart);
        countdown.tick(now.checked_add(2.seconds())?);

        assert_eq!(countdown.ensure_live(), Err(CartError::CartExpired));

        Ok(())
    }

    #[test]
    fn cart_serde_round_trip() -> TestResult {
        let now = base_time()?;
        let mut cart = Cart::new(EUR);

        cart.add(hold("kayak-tour", now.checked_add(10.minutes())?, 4500));

        let json = serde_json::to_string(&cart)?;
        let restored: Cart = serde_json::from_str(&json)?;

        assert_eq!(restored.len(), cart.len());
        assert_eq!(restored.subtotal(), cart.subtotal());
        assert_eq!(restored.earliest_expiry(), cart.earliest_expiry());
        assert_eq!(restored.currency(), EUR);

        Ok(())
    }
}
