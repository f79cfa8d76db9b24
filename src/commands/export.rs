//! Data export command for external analysis and backup.
//!
//! Exports raw entries, an aggregated report, or the per-day summary
//! series over a date range, as CSV, JSON, or Excel.

use crate::{
    libs::{
        config::Config,
        export::{ExportData, ExportFormat, Exporter},
        messages::Message,
        report::month_bounds,
    },
    msg_info,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Type of data to export
    #[arg(value_enum, default_value = "entries")]
    data: ExportData,

    /// Output format for the exported data
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Start of the date range (defaults to the first of the current month)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the date range (defaults to the last of the current month)
    #[arg(long)]
    to: Option<NaiveDate>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let (month_from, month_to) = month_bounds(Local::now().date_naive());
    let from = args.from.unwrap_or(month_from);
    let to = args.to.unwrap_or(month_to);

    msg_info!(Message::ExportingData(format!("{:?}", args.data), format!("{:?}", args.format)));

    let exporter = Exporter::new(args.format, args.output);
    exporter.export(args.data, &config.user(), from, to)?;

    Ok(())
}
