//! Earnings report aggregation over a date range.
//!
//! The aggregator folds a snapshot of time entries into totals, an
//! average hourly rate, and a per-day series suitable for charting. It
//! is a pure function: entries are filtered to the closed date range,
//! ongoing entries (no end time) are excluded, and each qualifying
//! entry is priced with [`crate::libs::pay::entry_pay`].
//!
//! Totals are literal sums with no currency conversion. The report
//! currency is the code appearing most often among qualifying entries
//! (ties broken by first-encountered order); every distinct code seen
//! is recorded in [`TimesheetReport::currencies`] so callers can warn
//! when a range mixes currencies instead of silently misreading the sum.

use crate::db::entries::TimeEntry;
use crate::libs::currency::Currency;
use crate::libs::formatter::{format_clock, format_money};
use crate::libs::pay::{entry_pay, EntryPay};
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// First and last calendar day of the month containing `date`. Used as
/// the default report range.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap();
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
    .unwrap();
    (first, next_month.pred_opt().unwrap())
}

/// One qualifying entry with its computed billable value.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub hours: f64,
    pub pay: f64,
    pub currency: Currency,
}

/// Hours and earnings summed for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub hours: f64,
    pub earnings: f64,
}

/// A derived, never-persisted aggregation over entries in a date range.
///
/// Totals and the average rate are kept unrounded; display rounding is
/// the renderer's job.
#[derive(Debug, Clone)]
pub struct TimesheetReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub entries: Vec<ReportEntry>,
    pub total_hours: f64,
    pub total_earnings: f64,
    /// total_earnings / total_hours, zero when no hours were billed.
    pub average_rate: f64,
    /// The plurality currency among qualifying entries.
    pub currency: Currency,
    /// Every distinct currency seen, in first-encountered order. More
    /// than one element means the totals mix currencies.
    pub currencies: Vec<Currency>,
    /// Per-day series, ascending by date.
    pub daily: Vec<DaySummary>,
}

impl TimesheetReport {
    pub fn is_mixed_currency(&self) -> bool {
        self.currencies.len() > 1
    }
}

/// Aggregates entries over the closed date range `[from, to]`.
///
/// Entries outside the range and entries still in progress are
/// excluded. Returns `None` when no entry qualifies.
pub fn aggregate(entries: &[TimeEntry], from: NaiveDate, to: NaiveDate) -> Option<TimesheetReport> {
    let mut report_entries = Vec::new();
    let mut total_hours = 0.0;
    let mut total_earnings = 0.0;
    let mut currency_counts: Vec<(Currency, usize)> = Vec::new();
    let mut daily: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for entry in entries {
        if entry.date < from || entry.date > to {
            continue;
        }
        let (hours, pay) = match entry_pay(entry) {
            EntryPay::InProgress => continue,
            EntryPay::Billable { hours, pay } => (hours, pay),
        };

        total_hours += hours;
        total_earnings += pay;

        match currency_counts.iter_mut().find(|(c, _)| *c == entry.currency) {
            Some((_, count)) => *count += 1,
            None => currency_counts.push((entry.currency, 1)),
        }

        let day = daily.entry(entry.date).or_insert((0.0, 0.0));
        day.0 += hours;
        day.1 += pay;

        // Ongoing entries were skipped above, so end is present here.
        report_entries.push(ReportEntry {
            date: entry.date,
            start: entry.start,
            end: entry.end.unwrap_or(entry.start),
            hours,
            pay,
            currency: entry.currency,
        });
    }

    if report_entries.is_empty() {
        return None;
    }

    // Plurality wins; a tie keeps the earlier-encountered code.
    let mut currency = currency_counts[0].0;
    let mut best = currency_counts[0].1;
    for &(code, count) in &currency_counts[1..] {
        if count > best {
            currency = code;
            best = count;
        }
    }

    let average_rate = if total_hours > 0.0 { total_earnings / total_hours } else { 0.0 };

    Some(TimesheetReport {
        from,
        to,
        entries: report_entries,
        total_hours,
        total_earnings,
        average_rate,
        currency,
        currencies: currency_counts.into_iter().map(|(c, _)| c).collect(),
        daily: daily
            .into_iter()
            .map(|(date, (hours, earnings))| DaySummary { date, hours, earnings })
            .collect(),
    })
}

/// Renders the report as plain text: one line per qualifying entry and
/// a total trailer, all amounts with two decimal places.
pub fn render_text(report: &TimesheetReport) -> String {
    let mut lines = Vec::with_capacity(report.entries.len() + 1);

    for entry in &report.entries {
        lines.push(format!(
            "{} - Work from {} to {} - {}",
            entry.date.format("%B %-d, %Y"),
            format_clock(&entry.start),
            format_clock(&entry.end),
            format_money(entry.pay, entry.currency),
        ));
    }
    lines.push(format!("Total Pay: {}", format_money(report.total_earnings, report.currency)));

    lines.join("\n")
}
