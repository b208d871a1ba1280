//! Waypoint
//!
//! Waypoint is the booking workflow core of a tourism marketplace: exact
//! commission splitting, a gated listing-submission wizard, time-boxed cart
//! holds with a countdown, and a persistable checkout session.

pub mod cart;
pub mod checkout;
pub mod commission;
pub mod fixtures;
pub mod listings;
pub mod money;
pub mod store;
pub mod summary;
pub mod utils;
pub mod wizard;
