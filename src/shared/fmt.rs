//! Display formatting for prices and volumes.
//!
//! Price readouts are rounded in decimal space rather than by binary-float
//! formatting: the float's shortest round-trip rendering is parsed into a
//! `Decimal` first, so a value the caller thinks of as `42.345` rounds
//! half-up to `42.35` instead of falling on whichever side of the midpoint
//! the nearest `f64` happens to sit.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Format a price with exactly two decimal places, rounding half-up.
pub fn display_price(value: f64) -> String {
    match Decimal::from_str(&value.to_string()) {
        Ok(d) => {
            let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        }
        // Non-finite or out-of-range values (never produced by the API).
        Err(_) => format!("{value:.2}"),
    }
}

/// Abbreviate a large value with a K/M/B/T suffix for compact readouts.
pub fn abbreviate(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, "T")
    } else if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("{scaled:.2}{suffix}")
}
