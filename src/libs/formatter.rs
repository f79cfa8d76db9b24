//! Formatting and parsing helpers for clock times and money amounts.
//!
//! All wall-clock values move through the application as "HH:MM" strings
//! (form input, database rows, table display). Parsing is strict: two
//! digit groups separated by a colon, 24-hour range. Money amounts are
//! always rendered with exactly two decimal places behind the currency
//! symbol; hours are shown with one decimal place but kept at full
//! precision everywhere else.

use crate::libs::currency::Currency;
use chrono::NaiveTime;
use thiserror::Error;

/// Error produced for a malformed "HH:MM" string.
#[derive(Debug, Error, PartialEq)]
#[error("Invalid time '{0}', expected HH:MM")]
pub struct ParseClockError(pub String);

/// Parses a strict 24-hour "HH:MM" string into a [`NaiveTime`].
pub fn parse_clock(value: &str) -> Result<NaiveTime, ParseClockError> {
    let err = || ParseClockError(value.to_string());

    let (hh, mm) = value.split_once(':').ok_or_else(err)?;
    if hh.len() != 2 || mm.len() != 2 || !hh.bytes().all(|b| b.is_ascii_digit()) || !mm.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let hours: u32 = hh.parse().map_err(|_| err())?;
    let minutes: u32 = mm.parse().map_err(|_| err())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(err)
}

/// Formats a time of day as "HH:MM".
pub fn format_clock(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Formats a money amount as "<symbol><amount>" with two decimal places.
pub fn format_money(amount: f64, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), amount)
}

/// Formats an hour count for display with one decimal place.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}
