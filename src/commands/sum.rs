use crate::{
    commands::report::print_totals,
    db::entries::TimeEntries,
    libs::{
        cache::{EntryCache, EntryQuery},
        config::Config,
        messages::Message,
        report::{aggregate, month_bounds},
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {
    /// Any date inside the month to summarize (defaults to today)
    #[arg(short, long)]
    month: Option<NaiveDate>,
}

pub fn cmd(sum_args: SumArgs) -> Result<()> {
    let config = Config::read()?;
    let anchor = sum_args.month.unwrap_or_else(|| Local::now().date_naive());
    let (from, to) = month_bounds(anchor);

    msg_print!(Message::EarningsForMonth(anchor.format("%B, %Y").to_string()), true);

    let mut cache = EntryCache::new(TimeEntries::new()?);
    let query = EntryQuery::new(config.user(), from, to);
    let entries = cache.fetch(&query)?;

    let report = match aggregate(&entries, from, to) {
        Some(report) => report,
        None => {
            msg_info!(Message::NoReportData(format!("{} - {}", from, to)));
            return Ok(());
        }
    };

    View::daily(&report)?;
    print_totals(&report);

    if report.is_mixed_currency() {
        let codes = report.currencies.iter().map(|c| c.code()).collect::<Vec<_>>().join(", ");
        msg_warning!(Message::MixedCurrencies(codes));
    }

    Ok(())
}
