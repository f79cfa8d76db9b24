//! Billable duration and pay calculation for a single time entry.
//!
//! The calculation is a pure function over an entry snapshot: worked
//! minutes are the wall-clock span between start and end minus the
//! break, floored at zero. An entry without an end time is still in
//! progress and has no billable value. The end time is always read as
//! the same calendar day as the start; a span that comes out negative
//! (end before start) is billed as zero rather than rolled over to the
//! next day.
//!
//! Degenerate numeric input never raises: it degrades to zero hours and
//! zero pay.

use crate::db::entries::TimeEntry;
use chrono::NaiveTime;

/// Billable outcome of one time entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryPay {
    /// The entry has no end time yet; hours and pay are not computed.
    InProgress,
    /// Billable hours and earned pay, at full float precision.
    Billable { hours: f64, pay: f64 },
}

impl EntryPay {
    pub fn hours(&self) -> Option<f64> {
        match self {
            EntryPay::InProgress => None,
            EntryPay::Billable { hours, .. } => Some(*hours),
        }
    }

    pub fn pay(&self) -> Option<f64> {
        match self {
            EntryPay::InProgress => None,
            EntryPay::Billable { pay, .. } => Some(*pay),
        }
    }

    pub fn is_billable(&self) -> bool {
        matches!(self, EntryPay::Billable { .. })
    }
}

/// Minutes billed for a worked span: (end - start) - break, floored at
/// zero. Covers the break-exceeds-span and end-before-start cases.
pub fn billable_minutes(start: NaiveTime, end: NaiveTime, break_minutes: i64) -> i64 {
    let raw_minutes = (end - start).num_minutes();
    (raw_minutes - break_minutes).max(0)
}

/// Computes the billable hours and pay for an entry snapshot.
///
/// Returns [`EntryPay::InProgress`] when the entry has no end time.
/// Hours retain full precision; rounding happens only at display.
pub fn entry_pay(entry: &TimeEntry) -> EntryPay {
    let end = match entry.end {
        Some(end) => end,
        None => return EntryPay::InProgress,
    };

    let minutes = billable_minutes(entry.start, end, entry.break_minutes);
    let hours = minutes as f64 / 60.0;
    EntryPay::Billable {
        hours,
        pay: hours * entry.hourly_rate,
    }
}
