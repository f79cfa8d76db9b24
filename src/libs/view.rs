use crate::db::entries::TimeEntry;
use crate::db::templates::EntryTemplate;
use crate::libs::formatter::{format_clock, format_hours, format_money};
use crate::libs::pay::{entry_pay, EntryPay};
use crate::libs::report::TimesheetReport;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn entries(entries: &[TimeEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "START", "END", "BREAK", "RATE", "PAY"]);
        for entry in entries {
            let (end, pay) = match entry_pay(entry) {
                EntryPay::InProgress => ("ongoing".to_string(), "-".to_string()),
                EntryPay::Billable { pay, .. } => (
                    entry.end.map(|t| format_clock(&t)).unwrap_or_default(),
                    format_money(pay, entry.currency),
                ),
            };
            table.add_row(row![
                entry.id.unwrap_or(0),
                entry.date.format("%Y-%m-%d"),
                format_clock(&entry.start),
                end,
                format!("{} min", entry.break_minutes),
                format!("{}/hr", format_money(entry.hourly_rate, entry.currency)),
                pay
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn templates(templates: &[EntryTemplate]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["NAME", "START", "END", "BREAK", "RATE", "CURRENCY"]);
        for template in templates {
            table.add_row(row![
                template.name,
                template.start.map(|t| format_clock(&t)).unwrap_or_else(|| "-".to_string()),
                template.end.map(|t| format_clock(&t)).unwrap_or_else(|| "-".to_string()),
                format!("{} min", template.break_minutes),
                format!("{:.2}/hr", template.hourly_rate),
                template.currency.code()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn report(report: &TimesheetReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "START", "END", "HOURS", "PAY"]);
        for entry in &report.entries {
            table.add_row(row![
                entry.date.format("%Y-%m-%d"),
                format_clock(&entry.start),
                format_clock(&entry.end),
                format_hours(entry.hours),
                format_money(entry.pay, entry.currency)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn daily(report: &TimesheetReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "HOURS", "EARNINGS"]);
        for day in &report.daily {
            table.add_row(row![
                day.date.format("%Y-%m-%d"),
                format_hours(day.hours),
                format_money(day.earnings, report.currency)
            ]);
        }
        table.printstd();

        Ok(())
    }
}
