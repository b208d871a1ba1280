//! Booking Demo
//!
//! Walks one session through the whole core: load a fixture catalog, place
//! holds in a cart, tick the countdown, fill the checkout form, split the
//! charge, and print the booking summary.
//!
//! Use `-f` to load a fixture set by name
//! Use `-e` to simulate a number of seconds passing before checkout
//!
//! Run with: `cargo run --example booking`

use std::io;

use anyhow::Result;
use clap::Parser;
use jiff::{Timestamp, ToSpan};

use waypoint::{
    cart::{CountdownStatus, HoldCountdown},
    checkout::{CheckoutForm, FieldId},
    fixtures::Fixture,
    summary::write_summary,
    utils::DemoBookingArgs,
};

/// Booking Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoBookingArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;

    let now = Timestamp::now();
    let cart = fixture.cart(now)?;

    let mut countdown = HoldCountdown::new();
    countdown.sync(&cart);

    let checkout_time = now.checked_add(args.elapsed.seconds())?;

    match countdown.tick(checkout_time) {
        CountdownStatus::Running => {
            let left = countdown.time_left(checkout_time);

            println!("Holds live, {left} left on the earliest hold");
        }
        CountdownStatus::Expired => {
            println!("The earliest hold expired; re-acquire holds before checking out");
            return Ok(());
        }
        CountdownStatus::Idle => {
            println!("Cart is empty; nothing to check out");
            return Ok(());
        }
    }

    let mut form = CheckoutForm::new();
    form.set_field(FieldId::FirstName, "Maria");
    form.set_field(FieldId::LastName, "Santos");
    form.set_field(FieldId::Email, "maria@example.com");
    form.set_field(FieldId::Phone, "+34 600 123 456");
    form.set_field(FieldId::CardholderName, "Maria Santos");
    form.set_field(FieldId::CardNumber, "4242 4242 4242 4242");
    form.set_field(FieldId::ExpiryMonth, "9");
    form.set_field(FieldId::ExpiryYear, "2027");
    form.set_field(FieldId::SecurityCode, "123");
    form.set_field(FieldId::AddressLine1, "Carrer Major 1");
    form.set_field(FieldId::City, "Palma");
    form.set_field(FieldId::PostalCode, "07001");
    form.set_field(FieldId::Country, "Spain");

    let _submission = form.submit(&countdown)?;

    let breakdown = fixture.rates().split(&cart.subtotal(), fixture.any_hosted())?;

    write_summary(io::stdout(), &cart, fixture.listings(), &breakdown)?;

    Ok(())
}
