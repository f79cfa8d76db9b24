//! Data export for external analysis and backup.
//!
//! Supports three output formats (CSV for spreadsheets, JSON for
//! programmatic processing, Excel for formatted workbooks) over three
//! data types: raw time entries, an aggregated report, and the per-day
//! summary series. Export structures carry pre-formatted string fields
//! so every format renders identically.

use crate::db::entries::{TimeEntries, TimeEntry};
use crate::libs::formatter::format_clock;
use crate::libs::messages::Message;
use crate::libs::pay::{entry_pay, EntryPay};
use crate::libs::report::{aggregate, TimesheetReport};
use crate::{msg_error_anyhow, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Output format for an export operation.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

/// Data category to export.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportData {
    /// Raw time entries in the date range
    Entries,
    /// Aggregated report with totals and average rate
    Report,
    /// Per-day hours and earnings series
    Summary,
}

/// A time entry flattened to display strings for export.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportEntry {
    pub id: i64,
    pub date: String,
    pub start: String,
    pub end: String,
    pub break_minutes: i64,
    pub hourly_rate: f64,
    pub currency: String,
    pub hours: String,
    pub pay: String,
}

/// One qualifying entry line inside an exported report.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportReportLine {
    pub date: String,
    pub start: String,
    pub end: String,
    pub hours: String,
    pub pay: String,
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportReport {
    pub from: String,
    pub to: String,
    pub currency: String,
    pub total_hours: String,
    pub total_pay: String,
    pub average_rate: String,
    pub entries: Vec<ExportReportLine>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDaySum {
    pub date: String,
    pub hours: String,
    pub earnings: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSummary {
    pub from: String,
    pub to: String,
    pub currency: String,
    pub days: Vec<ExportDaySum>,
    pub total_hours: String,
    pub total_pay: String,
}

/// Export handler: owns the format and output destination and renders
/// each data type into it.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter; without an explicit path a timestamped
    /// default filename is generated next to the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("paylog_export_{}", Local::now().format("%Y%m%d_%H%M%S"));

        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        };

        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    /// Exports the requested data type for a user and date range.
    pub fn export(&self, data_type: ExportData, user: &str, from: NaiveDate, to: NaiveDate) -> Result<()> {
        match data_type {
            ExportData::Entries => self.export_entries(user, from, to),
            ExportData::Report => self.export_report(user, from, to),
            ExportData::Summary => self.export_summary(user, from, to),
        }
    }

    fn export_entries(&self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<()> {
        let entries = TimeEntries::new()?.fetch_range(user, from, to)?;
        let export_entries: Vec<ExportEntry> = entries.iter().map(Self::map_entry).collect();

        match self.format {
            ExportFormat::Csv => self.export_entries_csv(&export_entries)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(&export_entries)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Excel => self.export_entries_excel(&export_entries)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_report(&self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<()> {
        let report_data = self.gather_report_data(user, from, to)?;

        match self.format {
            ExportFormat::Csv => self.export_report_csv(&report_data)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(&report_data)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Excel => self.export_report_excel(&report_data)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_summary(&self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<()> {
        let report = self.gather_report(user, from, to)?;

        let summary = ExportSummary {
            from: from.format("%Y-%m-%d").to_string(),
            to: to.format("%Y-%m-%d").to_string(),
            currency: report.currency.code().to_string(),
            days: report
                .daily
                .iter()
                .map(|day| ExportDaySum {
                    date: day.date.format("%Y-%m-%d").to_string(),
                    hours: format!("{:.2}", day.hours),
                    earnings: format!("{:.2}", day.earnings),
                })
                .collect(),
            total_hours: format!("{:.2}", report.total_hours),
            total_pay: format!("{:.2}", report.total_earnings),
        };

        match self.format {
            ExportFormat::Csv => self.export_summary_csv(&summary)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(&summary)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Excel => self.export_summary_excel(&summary)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn gather_report(&self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<TimesheetReport> {
        let entries = TimeEntries::new()?.fetch_range(user, from, to)?;
        aggregate(&entries, from, to)
            .ok_or_else(|| msg_error_anyhow!(Message::NoReportData(format!("{} - {}", from, to))))
    }

    fn gather_report_data(&self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<ExportReport> {
        let report = self.gather_report(user, from, to)?;

        Ok(ExportReport {
            from: from.format("%Y-%m-%d").to_string(),
            to: to.format("%Y-%m-%d").to_string(),
            currency: report.currency.code().to_string(),
            total_hours: format!("{:.2}", report.total_hours),
            total_pay: format!("{:.2}", report.total_earnings),
            average_rate: format!("{:.2}", report.average_rate),
            entries: report
                .entries
                .iter()
                .map(|entry| ExportReportLine {
                    date: entry.date.format("%Y-%m-%d").to_string(),
                    start: format_clock(&entry.start),
                    end: format_clock(&entry.end),
                    hours: format!("{:.2}", entry.hours),
                    pay: format!("{:.2}", entry.pay),
                    currency: entry.currency.code().to_string(),
                })
                .collect(),
        })
    }

    fn map_entry(entry: &TimeEntry) -> ExportEntry {
        let (hours, pay) = match entry_pay(entry) {
            EntryPay::InProgress => ("-".to_string(), "-".to_string()),
            EntryPay::Billable { hours, pay } => (format!("{:.2}", hours), format!("{:.2}", pay)),
        };
        ExportEntry {
            id: entry.id.unwrap_or(0),
            date: entry.date.format("%Y-%m-%d").to_string(),
            start: format_clock(&entry.start),
            end: entry.end.map(|t| format_clock(&t)).unwrap_or_else(|| "ongoing".to_string()),
            break_minutes: entry.break_minutes,
            hourly_rate: entry.hourly_rate,
            currency: entry.currency.code().to_string(),
            hours,
            pay,
        }
    }

    fn export_entries_csv(&self, entries: &[ExportEntry]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["ID", "Date", "Start", "End", "Break", "Rate", "Currency", "Hours", "Pay"])?;

        for entry in entries {
            wtr.write_record(&[
                entry.id.to_string(),
                entry.date.clone(),
                entry.start.clone(),
                entry.end.clone(),
                entry.break_minutes.to_string(),
                format!("{:.2}", entry.hourly_rate),
                entry.currency.clone(),
                entry.hours.clone(),
                entry.pay.clone(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_report_csv(&self, report: &ExportReport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(["ENTRIES", "", "", "", ""])?;
        wtr.write_record(["Date", "Start", "End", "Hours", "Pay"])?;
        for entry in &report.entries {
            wtr.write_record(&[
                entry.date.clone(),
                entry.start.clone(),
                entry.end.clone(),
                entry.hours.clone(),
                entry.pay.clone(),
            ])?;
        }

        wtr.write_record(["", "", "", "", ""])?;
        wtr.write_record(["SUMMARY", "", "", "", ""])?;
        wtr.write_record(["Period", &format!("{} - {}", report.from, report.to), "", "", ""])?;
        wtr.write_record(["Currency", &report.currency, "", "", ""])?;
        wtr.write_record(["Total Hours", &report.total_hours, "", "", ""])?;
        wtr.write_record(["Total Pay", &report.total_pay, "", "", ""])?;
        wtr.write_record(["Average Rate", &report.average_rate, "", "", ""])?;

        wtr.flush()?;
        Ok(())
    }

    fn export_summary_csv(&self, summary: &ExportSummary) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record([
            format!("Earnings Summary {} - {}", summary.from, summary.to),
            "".to_owned(),
            "".to_owned(),
        ])?;
        wtr.write_record(["Date", "Hours", "Earnings"])?;

        for day in &summary.days {
            wtr.write_record(&[day.date.clone(), day.hours.clone(), day.earnings.clone()])?;
        }

        wtr.write_record(["", "", ""])?;
        wtr.write_record(["Total Hours", &summary.total_hours, ""])?;
        wtr.write_record(["Total Pay", &summary.total_pay, ""])?;

        wtr.flush()?;
        Ok(())
    }

    fn export_entries_excel(&self, entries: &[ExportEntry]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        worksheet.write_string_with_format(0, 0, "ID", &header_format)?;
        worksheet.write_string_with_format(0, 1, "Date", &header_format)?;
        worksheet.write_string_with_format(0, 2, "Start", &header_format)?;
        worksheet.write_string_with_format(0, 3, "End", &header_format)?;
        worksheet.write_string_with_format(0, 4, "Break", &header_format)?;
        worksheet.write_string_with_format(0, 5, "Rate", &header_format)?;
        worksheet.write_string_with_format(0, 6, "Currency", &header_format)?;
        worksheet.write_string_with_format(0, 7, "Hours", &header_format)?;
        worksheet.write_string_with_format(0, 8, "Pay", &header_format)?;

        for (i, entry) in entries.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, entry.id as f64)?;
            worksheet.write_string(row, 1, &entry.date)?;
            worksheet.write_string(row, 2, &entry.start)?;
            worksheet.write_string(row, 3, &entry.end)?;
            worksheet.write_number(row, 4, entry.break_minutes as f64)?;
            worksheet.write_number(row, 5, entry.hourly_rate)?;
            worksheet.write_string(row, 6, &entry.currency)?;
            worksheet.write_string(row, 7, &entry.hours)?;
            worksheet.write_string(row, 8, &entry.pay)?;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_report_excel(&self, report: &ExportReport) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        worksheet.write_string_with_format(0, 0, "ENTRIES", &header_format)?;
        worksheet.write_string_with_format(1, 0, "Date", &header_format)?;
        worksheet.write_string_with_format(1, 1, "Start", &header_format)?;
        worksheet.write_string_with_format(1, 2, "End", &header_format)?;
        worksheet.write_string_with_format(1, 3, "Hours", &header_format)?;
        worksheet.write_string_with_format(1, 4, "Pay", &header_format)?;

        let mut row = 2;
        for entry in &report.entries {
            worksheet.write_string(row, 0, &entry.date)?;
            worksheet.write_string(row, 1, &entry.start)?;
            worksheet.write_string(row, 2, &entry.end)?;
            worksheet.write_string(row, 3, &entry.hours)?;
            worksheet.write_string(row, 4, &entry.pay)?;
            row += 1;
        }

        row += 2;
        worksheet.write_string_with_format(row, 0, "SUMMARY", &header_format)?;
        row += 1;
        worksheet.write_string(row, 0, "Period")?;
        worksheet.write_string(row, 1, &format!("{} - {}", report.from, report.to))?;
        row += 1;
        worksheet.write_string(row, 0, "Currency")?;
        worksheet.write_string(row, 1, &report.currency)?;
        row += 1;
        worksheet.write_string(row, 0, "Total Hours")?;
        worksheet.write_string(row, 1, &report.total_hours)?;
        row += 1;
        worksheet.write_string(row, 0, "Total Pay")?;
        worksheet.write_string(row, 1, &report.total_pay)?;
        row += 1;
        worksheet.write_string(row, 0, "Average Rate")?;
        worksheet.write_string(row, 1, &report.average_rate)?;

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_summary_excel(&self, summary: &ExportSummary) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let title_format = Format::new().set_bold().set_font_size(14.0);

        worksheet.write_string_with_format(0, 0, &format!("Earnings Summary {} - {}", summary.from, summary.to), &title_format)?;
        worksheet.write_string_with_format(2, 0, "Date", &header_format)?;
        worksheet.write_string_with_format(2, 1, "Hours", &header_format)?;
        worksheet.write_string_with_format(2, 2, "Earnings", &header_format)?;

        let mut row = 3;
        for day in &summary.days {
            worksheet.write_string(row, 0, &day.date)?;
            worksheet.write_string(row, 1, &day.hours)?;
            worksheet.write_string(row, 2, &day.earnings)?;
            row += 1;
        }

        row += 1;
        worksheet.write_string(row, 0, "Total Hours")?;
        worksheet.write_string(row, 1, &summary.total_hours)?;
        row += 1;
        worksheet.write_string(row, 0, "Total Pay")?;
        worksheet.write_string(row, 1, &summary.total_pay)?;

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}
