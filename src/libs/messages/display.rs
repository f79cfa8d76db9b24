//! Display implementation for application messages.
//!
//! All user-facing text lives in this single `Display` impl so wording
//! stays consistent across commands and can be changed in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ENTRY MESSAGES ===
            Message::EntryCreated(id) => format!("Time entry #{} added", id),
            Message::EntryUpdated(id) => format!("Time entry #{} updated", id),
            Message::EntryDeleted(id) => format!("Time entry #{} deleted", id),
            Message::EntryNotFound(id) => format!("Time entry #{} not found", id),
            Message::EntryCreateFailed => "Failed to create time entry".to_string(),
            Message::EntryUpdateFailed => "Failed to update time entry".to_string(),
            Message::EntryFinished(end) => format!("Ongoing entry finished at {}", end),
            Message::NoOngoingEntry => "No ongoing entry found for today".to_string(),
            Message::NoEntriesFound(range) => format!("No time entries found for {}", range),
            Message::EntryListHeader(range) => format!("Time entries for {}", range),
            Message::ConfirmDeleteEntry(id) => format!("Delete time entry #{}?", id),
            Message::EditingEntry(id) => format!("Editing time entry #{}", id),
            Message::EntryInProgressNote => "Entry saved without an end time; finish it later with 'paylog entry finish'".to_string(),

            // === TEMPLATE MESSAGES ===
            Message::TemplateCreated(name) => format!("Template '{}' created", name),
            Message::TemplateUpdated(name) => format!("Template '{}' updated", name),
            Message::TemplateDeleted(name) => format!("Template '{}' deleted", name),
            Message::TemplateNotFound(name) => format!("Template '{}' not found", name),
            Message::TemplateAlreadyExists(name) => format!("Template '{}' already exists", name),
            Message::TemplateCreateFailed => "Failed to create template".to_string(),
            Message::NoTemplatesFound => "No templates found".to_string(),
            Message::NoTemplatesMatchingQuery(query) => format!("No templates matching '{}'", query),
            Message::TemplateListHeader => "Saved templates".to_string(),
            Message::TemplateSearchResults(query) => format!("Templates matching '{}'", query),
            Message::SelectTemplateToEdit => "Select template to edit".to_string(),
            Message::SelectTemplateToDelete => "Select template to delete".to_string(),
            Message::SelectTemplateAction => "What would you like to do?".to_string(),
            Message::EditingTemplate(name) => format!("Editing template '{}'", name),
            Message::ConfirmDeleteTemplate(name) => format!("Delete template '{}'?", name),

            // === REPORT MESSAGES ===
            Message::ReportHeader(range) => format!("Report for {}", range),
            Message::NoReportData(range) => format!("No completed entries for {}", range),
            Message::MixedCurrencies(codes) => {
                format!("Entries mix currencies ({}); totals are summed without conversion", codes)
            }
            Message::EarningsForMonth(month) => format!("Earnings for {}", month),
            Message::TotalHours(hours) => format!("Total hours: {}", hours),
            Message::TotalEarnings(total) => format!("Total pay: {}", total),
            Message::AverageRate(rate) => format!("Average hourly rate: {}", rate),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleProfile => "Profile settings".to_string(),
            Message::ConfigModuleDefaults => "New entry defaults".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => format!("Exporting {} as {}...", data, format),
            Message::ExportCompleted(path) => format!("Data exported successfully to: {}", path),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptUserName => "Enter your user name".to_string(),
            Message::PromptDefaultRate => "Enter default hourly rate".to_string(),
            Message::PromptDefaultCurrency => "Select default currency".to_string(),
            Message::PromptDefaultBreak => "Enter default break (minutes)".to_string(),
            Message::PromptEntryDate => "Enter date (YYYY-MM-DD)".to_string(),
            Message::PromptStartTime => "Enter start time (HH:MM)".to_string(),
            Message::PromptEndTime => "Enter end time (HH:MM, empty if still working)".to_string(),
            Message::PromptBreakMinutes => "Enter break (minutes)".to_string(),
            Message::PromptHourlyRate => "Enter hourly rate".to_string(),
            Message::PromptSelectCurrency => "Select currency".to_string(),
            Message::PromptTemplateName => "Enter template name".to_string(),

            // === VALIDATION ===
            Message::InvalidClockTime => "Time must be HH:MM in 24-hour format".to_string(),
            Message::BreakMinutesNegative => "Break minutes must be zero or more".to_string(),
            Message::RateNegative => "Hourly rate must be zero or more".to_string(),

            // === GENERIC ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };

        write!(f, "{}", text)
    }
}
