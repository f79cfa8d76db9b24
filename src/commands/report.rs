//! Earnings report command.
//!
//! Aggregates completed entries over a closed date range: entry table,
//! totals, average hourly rate, and an optional plain-text rendering.
//! Ongoing entries are excluded from totals. Mixing currencies inside
//! the range is reported as a warning; the sums are never converted.

use crate::{
    db::entries::TimeEntries,
    libs::{
        cache::{EntryCache, EntryQuery},
        config::Config,
        formatter::format_money,
        messages::Message,
        report::{aggregate, month_bounds, render_text, TimesheetReport},
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Start of the date range (defaults to the first of the current month)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// End of the date range (defaults to the last of the current month)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Report a single day instead of a range
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    date: Option<NaiveDate>,
    /// Print the plain-text report as well
    #[arg(long)]
    text: bool,
}

pub fn cmd(report_args: ReportArgs) -> Result<()> {
    let config = Config::read()?;

    let (from, to) = match report_args.date {
        Some(date) => (date, date),
        None => {
            let (month_from, month_to) = month_bounds(Local::now().date_naive());
            (report_args.from.unwrap_or(month_from), report_args.to.unwrap_or(month_to))
        }
    };
    let range = format!("{} - {}", from, to);

    let mut cache = EntryCache::new(TimeEntries::new()?);
    let query = EntryQuery::new(config.user(), from, to);
    let entries = cache.fetch(&query)?;

    let report = match aggregate(&entries, from, to) {
        Some(report) => report,
        None => {
            msg_info!(Message::NoReportData(range));
            return Ok(());
        }
    };

    msg_print!(Message::ReportHeader(range), true);
    View::report(&report)?;
    print_totals(&report);

    if report.is_mixed_currency() {
        let codes = report.currencies.iter().map(|c| c.code()).collect::<Vec<_>>().join(", ");
        msg_warning!(Message::MixedCurrencies(codes));
    }

    if report_args.text {
        println!("\n{}", render_text(&report));
    }

    Ok(())
}

pub(crate) fn print_totals(report: &TimesheetReport) {
    msg_print!(Message::TotalHours(format!("{:.2}", report.total_hours)));
    msg_print!(Message::TotalEarnings(format_money(report.total_earnings, report.currency)));
    msg_print!(Message::AverageRate(format_money(report.average_rate, report.currency)));
}
