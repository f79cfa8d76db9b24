//! Time entry management command.
//!
//! Covers the full entry lifecycle: add (optionally from a template,
//! with prompts for anything not given as a flag), list over a date
//! range, edit, delete, and finishing today's ongoing entry. Rate,
//! currency, and break defaults are carried over from the most recent
//! entry, falling back to the configured defaults.

use crate::{
    db::{
        entries::{TimeEntries, TimeEntry},
        templates::{EntryTemplate, Templates},
    },
    libs::{
        cache::{EntryCache, EntryQuery},
        config::Config,
        currency::Currency,
        formatter::{format_clock, format_money, parse_clock},
        messages::Message,
        pay::{entry_pay, EntryPay},
        report::month_bounds,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    command: EntryCommand,
}

#[derive(Debug, Subcommand)]
enum EntryCommand {
    /// Add a new time entry
    Add {
        /// Entry date, defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,
        /// End time (HH:MM); omit for an ongoing entry
        #[arg(short, long)]
        end: Option<String>,
        /// Break minutes
        #[arg(short, long)]
        break_minutes: Option<i64>,
        /// Hourly rate
        #[arg(short, long)]
        rate: Option<f64>,
        /// Currency code
        #[arg(short, long)]
        currency: Option<Currency>,
        /// Prefill from a saved template
        #[arg(short, long)]
        template: Option<String>,
    },
    /// List entries for a date range (defaults to the current month)
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Edit an entry by id
    Edit { id: i64 },
    /// Delete an entry by id
    Delete { id: i64 },
    /// Set the end time of today's ongoing entry
    Finish,
}

pub fn cmd(args: EntryArgs) -> Result<()> {
    match args.command {
        EntryCommand::Add {
            date,
            start,
            end,
            break_minutes,
            rate,
            currency,
            template,
        } => handle_add(date, start, end, break_minutes, rate, currency, template),
        EntryCommand::List { from, to } => handle_list(from, to),
        EntryCommand::Edit { id } => handle_edit(id),
        EntryCommand::Delete { id } => handle_delete(id),
        EntryCommand::Finish => handle_finish(),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    date: Option<NaiveDate>,
    start: Option<String>,
    end: Option<String>,
    break_minutes: Option<i64>,
    rate: Option<f64>,
    currency: Option<Currency>,
    template_name: Option<String>,
) -> Result<()> {
    let config = Config::read()?;
    let user = config.user();
    let defaults = config.entry_defaults();

    let template = match template_name {
        Some(name) => match Templates::new()?.get(&name)? {
            Some(t) => Some(t),
            None => {
                msg_error!(Message::TemplateNotFound(name));
                return Ok(());
            }
        },
        None => None,
    };

    let mut cache = EntryCache::new(TimeEntries::new()?);

    // The most recent entry carries rate, currency, and break forward,
    // the same way the last form submission prefilled the next one.
    let latest = cache.store_mut().fetch_latest(&user)?;

    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let start = match start {
        Some(value) => parse_clock(&value)?,
        None => match template.as_ref().and_then(|t| t.start) {
            Some(time) => time,
            None => prompt_clock(Message::PromptStartTime, None)?,
        },
    };

    let end = match end {
        Some(value) => Some(parse_clock(&value)?),
        None => match template.as_ref().and_then(|t| t.end) {
            Some(time) => Some(time),
            None => prompt_clock_optional(Message::PromptEndTime, None)?,
        },
    };

    let break_minutes = break_minutes
        .or_else(|| template.as_ref().map(|t| t.break_minutes))
        .or_else(|| latest.as_ref().map(|e| e.break_minutes))
        .unwrap_or(defaults.break_minutes);

    let hourly_rate = rate
        .or_else(|| template.as_ref().map(|t| t.hourly_rate))
        .or_else(|| latest.as_ref().map(|e| e.hourly_rate))
        .unwrap_or(defaults.hourly_rate);

    let currency = currency
        .or_else(|| template.as_ref().map(|t| t.currency))
        .or_else(|| latest.as_ref().map(|e| e.currency))
        .unwrap_or(defaults.currency);

    let entry = TimeEntry {
        id: None,
        user,
        date,
        start,
        end,
        break_minutes,
        hourly_rate,
        currency,
    };

    let id = cache.insert(&entry)?;
    msg_success!(Message::EntryCreated(id));

    match entry_pay(&entry) {
        EntryPay::InProgress => msg_info!(Message::EntryInProgressNote),
        EntryPay::Billable { hours, pay } => {
            msg_print!(format!("{:.1} hours, {}", hours, format_money(pay, entry.currency)));
        }
    }

    Ok(())
}

fn handle_list(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let config = Config::read()?;
    let (month_from, month_to) = month_bounds(Local::now().date_naive());
    let from = from.unwrap_or(month_from);
    let to = to.unwrap_or(month_to);

    let mut cache = EntryCache::new(TimeEntries::new()?);
    let query = EntryQuery::new(config.user(), from, to);
    let entries = cache.fetch(&query)?;

    let range = format!("{} - {}", from, to);
    if entries.is_empty() {
        msg_info!(Message::NoEntriesFound(range));
        return Ok(());
    }

    msg_print!(Message::EntryListHeader(range), true);
    View::entries(&entries)?;
    Ok(())
}

fn handle_edit(id: i64) -> Result<()> {
    let mut cache = EntryCache::new(TimeEntries::new()?);

    let entry = match cache.store_mut().fetch(id)? {
        Some(e) => e,
        None => {
            msg_error!(Message::EntryNotFound(id));
            return Ok(());
        }
    };

    msg_print!(Message::EditingEntry(id), true);

    let date: NaiveDate = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptEntryDate.to_string())
        .default(entry.date)
        .interact_text()?;

    let start = prompt_clock(Message::PromptStartTime, Some(entry.start))?;
    let end = prompt_clock_optional(Message::PromptEndTime, entry.end)?;

    let break_minutes = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptBreakMinutes.to_string())
        .default(entry.break_minutes)
        .validate_with(|input: &i64| -> Result<(), String> {
            if *input >= 0 {
                Ok(())
            } else {
                Err(Message::BreakMinutesNegative.to_string())
            }
        })
        .interact_text()?;

    let hourly_rate = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptHourlyRate.to_string())
        .default(entry.hourly_rate)
        .validate_with(|input: &f64| -> Result<(), String> {
            if *input >= 0.0 {
                Ok(())
            } else {
                Err(Message::RateNegative.to_string())
            }
        })
        .interact_text()?;

    let currency = prompt_currency(entry.currency)?;

    let updated = TimeEntry {
        id: entry.id,
        user: entry.user,
        date,
        start,
        end,
        break_minutes,
        hourly_rate,
        currency,
    };
    cache.update(&updated)?;

    msg_success!(Message::EntryUpdated(id));
    Ok(())
}

fn handle_delete(id: i64) -> Result<()> {
    let mut cache = EntryCache::new(TimeEntries::new()?);

    if cache.store_mut().fetch(id)?.is_none() {
        msg_error!(Message::EntryNotFound(id));
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteEntry(id).to_string())
        .default(false)
        .interact()?;

    if confirmed {
        cache.delete(id)?;
        msg_success!(Message::EntryDeleted(id));
    } else {
        msg_info!(Message::OperationCancelled);
    }

    Ok(())
}

fn handle_finish() -> Result<()> {
    let config = Config::read()?;
    let today = Local::now().date_naive();

    let mut cache = EntryCache::new(TimeEntries::new()?);
    let query = EntryQuery::new(config.user(), today, today);
    let entries = cache.fetch(&query)?;

    let mut ongoing = match entries.into_iter().find(|e| e.end.is_none()) {
        Some(entry) => entry,
        None => {
            msg_info!(Message::NoOngoingEntry);
            return Ok(());
        }
    };

    let now = Local::now().time();
    let end = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap();
    ongoing.end = Some(end);
    cache.update(&ongoing)?;

    msg_success!(Message::EntryFinished(format_clock(&end)));
    Ok(())
}

fn prompt_clock(prompt: Message, default: Option<NaiveTime>) -> Result<NaiveTime> {
    let theme = ColorfulTheme::default();
    let mut input = Input::with_theme(&theme)
        .with_prompt(prompt.to_string())
        .validate_with(|value: &String| -> Result<(), String> {
            parse_clock(value).map(|_| ()).map_err(|_| Message::InvalidClockTime.to_string())
        });
    if let Some(time) = default {
        input = input.default(format_clock(&time));
    }
    let value: String = input.interact_text()?;
    Ok(parse_clock(&value)?)
}

fn prompt_clock_optional(prompt: Message, default: Option<NaiveTime>) -> Result<Option<NaiveTime>> {
    let theme = ColorfulTheme::default();
    let mut input = Input::with_theme(&theme)
        .with_prompt(prompt.to_string())
        .allow_empty(true)
        .validate_with(|value: &String| -> Result<(), String> {
            if value.is_empty() {
                return Ok(());
            }
            parse_clock(value).map(|_| ()).map_err(|_| Message::InvalidClockTime.to_string())
        });
    if let Some(time) = default {
        input = input.default(format_clock(&time));
    }
    let value: String = input.interact_text()?;

    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parse_clock(&value)?))
    }
}

pub(crate) fn prompt_currency(default: Currency) -> Result<Currency> {
    let items: Vec<String> = Currency::ALL.iter().map(|c| format!("{} {}", c.symbol(), c.name())).collect();
    let position = Currency::ALL.iter().position(|c| *c == default).unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectCurrency.to_string())
        .items(&items)
        .default(position)
        .interact()?;
    Ok(Currency::ALL[selection])
}

// Templates can prefill an entry directly; exposed for the template
// command's "use" flow.
pub(crate) fn entry_from_template(template: &EntryTemplate, user: String, date: NaiveDate, start: NaiveTime) -> TimeEntry {
    TimeEntry {
        id: None,
        user,
        date,
        start,
        end: template.end,
        break_minutes: template.break_minutes,
        hourly_rate: template.hourly_rate,
        currency: template.currency,
    }
}
