//! Booking Summary
//!
//! Renders a cart of held bookings and its commission breakdown as a
//! human-readable table, for order confirmation screens and the demo CLI.

use std::io;

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{cart::Cart, commission::CommissionBreakdown, listings::Listing};

/// Errors that can occur when rendering a booking summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A cart item references a listing missing from the catalog.
    #[error("missing listing {0}")]
    MissingListing(String),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error writing the rendered summary
    #[error("failed to write summary: {0}")]
    Io(#[from] io::Error),
}

/// Writes a table of cart items followed by the commission summary lines.
///
/// # Errors
///
/// Returns a [`SummaryError`] if a cart item references an unknown listing,
/// the breakdown arithmetic fails, or the output cannot be written.
pub fn write_summary(
    mut out: impl io::Write,
    cart: &Cart,
    listings: &FxHashMap<String, Listing<'_>>,
    breakdown: &CommissionBreakdown<'_>,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Booking", "Location", "Dates", "Party", "Price"]);

    for (_, item) in cart.iter() {
        let listing = listings
            .get(&item.listing_id)
            .ok_or_else(|| SummaryError::MissingListing(item.listing_id.clone()))?;

        let price = Money::from_minor(item.price_minor, cart.currency());

        builder.push_record([
            listing.name.clone(),
            listing.location.clone(),
            format!("{} to {}", item.start_date, item.end_date),
            format!("{}", item.party_size),
            format!("{price}"),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "\n{table}")?;

    write_summary_lines(&mut out, cart, breakdown)?;

    Ok(())
}

/// Writes the subtotal and commission split lines below the table.
fn write_summary_lines(
    out: &mut impl io::Write,
    cart: &Cart,
    breakdown: &CommissionBreakdown<'_>,
) -> Result<(), SummaryError> {
    let lines = [
        ("Subtotal:", format!("{}", cart.subtotal())),
        ("Platform fee:", format!("{}", breakdown.platform_fee())),
        ("Provider amount:", format!("{}", breakdown.provider_amount())),
        ("Host amount:", format!("{}", breakdown.host_amount())),
        ("Total:", format!("{}", breakdown.total()?)),
    ];

    let label_width = lines
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    for (label, value) in lines {
        writeln!(out, " {label:>label_width$}  {value}")?;
    }

    writeln!(out)?;

    Ok(())
}
