//! Entry template management command.
//!
//! Templates are named presets of entry defaults. They can prefill the
//! `entry add` form or instantiate a new entry directly via `use`.

use crate::{
    commands::entry::{entry_from_template, prompt_currency},
    db::{
        entries::TimeEntries,
        templates::{EntryTemplate, Templates},
    },
    libs::{
        cache::EntryCache,
        config::Config,
        currency::Currency,
        formatter::{format_clock, parse_clock},
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    command: Option<TemplateCommand>,
}

#[derive(Debug, Subcommand)]
enum TemplateCommand {
    /// Create a new template
    Create {
        /// Template name (unique identifier)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List all templates
    List,
    /// Edit an existing template
    Edit {
        /// Template name to edit
        name: Option<String>,
    },
    /// Delete a template
    Delete {
        /// Template name to delete
        name: Option<String>,
    },
    /// Search templates
    Search {
        /// Search query
        query: String,
    },
    /// Create a time entry directly from a template
    Use {
        /// Template name
        name: String,
        /// Entry date, defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

pub fn cmd(args: TemplateArgs) -> Result<()> {
    match args.command {
        Some(TemplateCommand::Create { name }) => handle_create(name),
        Some(TemplateCommand::List) => handle_list(),
        Some(TemplateCommand::Edit { name }) => handle_edit(name),
        Some(TemplateCommand::Delete { name }) => handle_delete(name),
        Some(TemplateCommand::Search { query }) => handle_search(query),
        Some(TemplateCommand::Use { name, date }) => handle_use(name, date),
        None => handle_interactive(),
    }
}

fn handle_create(name: Option<String>) -> Result<()> {
    let mut templates_db = Templates::new()?;

    let name = name.unwrap_or_else(|| {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTemplateName.to_string())
            .interact_text()
            .unwrap()
    });

    if templates_db.exists(&name)? {
        msg_error!(Message::TemplateAlreadyExists(name));
        return Ok(());
    }

    let defaults = Config::read()?.entry_defaults();
    let template = prompt_template_fields(
        name.clone(),
        None,
        None,
        defaults.break_minutes,
        defaults.hourly_rate,
        defaults.currency,
    )?;
    templates_db.create(&template)?;

    msg_success!(Message::TemplateCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let mut templates_db = Templates::new()?;
    let templates = templates_db.list()?;

    if templates.is_empty() {
        msg_info!(Message::NoTemplatesFound);
        return Ok(());
    }

    msg_print!(Message::TemplateListHeader, true);
    View::templates(&templates)?;
    Ok(())
}

fn handle_edit(name: Option<String>) -> Result<()> {
    let mut templates_db = Templates::new()?;

    let name = match name {
        Some(n) => n,
        None => match select_template(&mut templates_db, Message::SelectTemplateToEdit)? {
            Some(n) => n,
            None => return Ok(()),
        },
    };

    let template = match templates_db.get(&name)? {
        Some(t) => t,
        None => {
            msg_error!(Message::TemplateNotFound(name));
            return Ok(());
        }
    };

    msg_print!(Message::EditingTemplate(template.name.clone()), true);

    let updated = prompt_template_fields(
        name.clone(),
        template.start,
        template.end,
        template.break_minutes,
        template.hourly_rate,
        template.currency,
    )?;
    templates_db.update(&updated)?;

    msg_success!(Message::TemplateUpdated(name));
    Ok(())
}

fn handle_delete(name: Option<String>) -> Result<()> {
    let mut templates_db = Templates::new()?;

    let name = match name {
        Some(n) => n,
        None => match select_template(&mut templates_db, Message::SelectTemplateToDelete)? {
            Some(n) => n,
            None => return Ok(()),
        },
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteTemplate(name.clone()).to_string())
        .default(false)
        .interact()?;

    if confirmed {
        templates_db.delete(&name)?;
        msg_success!(Message::TemplateDeleted(name));
    } else {
        msg_info!(Message::OperationCancelled);
    }

    Ok(())
}

fn handle_search(query: String) -> Result<()> {
    let mut templates_db = Templates::new()?;
    let templates = templates_db.search(&query)?;

    if templates.is_empty() {
        msg_info!(Message::NoTemplatesMatchingQuery(query));
        return Ok(());
    }

    msg_print!(Message::TemplateSearchResults(query), true);
    View::templates(&templates)?;
    Ok(())
}

fn handle_use(name: String, date: Option<NaiveDate>) -> Result<()> {
    let mut templates_db = Templates::new()?;
    let template = match templates_db.get(&name)? {
        Some(t) => t,
        None => {
            msg_error!(Message::TemplateNotFound(name));
            return Ok(());
        }
    };

    let config = Config::read()?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    // A template without a start time still needs one for the entry.
    let start = match template.start {
        Some(time) => time,
        None => {
            let value: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptStartTime.to_string())
                .validate_with(|value: &String| -> Result<(), String> {
                    parse_clock(value).map(|_| ()).map_err(|_| Message::InvalidClockTime.to_string())
                })
                .interact_text()?;
            parse_clock(&value)?
        }
    };

    let entry = entry_from_template(&template, config.user(), date, start);

    let mut cache = EntryCache::new(TimeEntries::new()?);
    let id = cache.insert(&entry)?;
    msg_success!(Message::EntryCreated(id));

    if entry.end.is_none() {
        msg_info!(Message::EntryInProgressNote);
    }

    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Create new template", "List templates", "Edit template", "Delete template"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTemplateAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => handle_create(None),
        1 => handle_list(),
        2 => handle_edit(None),
        3 => handle_delete(None),
        _ => Ok(()),
    }
}

fn select_template(templates_db: &mut Templates, prompt: Message) -> Result<Option<String>> {
    let templates = templates_db.list()?;
    if templates.is_empty() {
        msg_info!(Message::NoTemplatesFound);
        return Ok(None);
    }

    let template_names: Vec<String> = templates.iter().map(|t| t.name.clone()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(&template_names)
        .interact()?;

    Ok(Some(template_names[selection].clone()))
}

fn prompt_template_fields(
    name: String,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    break_minutes: i64,
    hourly_rate: f64,
    currency: Currency,
) -> Result<EntryTemplate> {
    let start = prompt_optional_clock(Message::PromptStartTime, start)?;
    let end = prompt_optional_clock(Message::PromptEndTime, end)?;

    let break_minutes = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptBreakMinutes.to_string())
        .default(break_minutes)
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
        .default(hourly_rate)
        .validate_with(|input: &f64| -> Result<(), String> {
            if *input >= 0.0 {
                Ok(())
            } else {
                Err(Message::RateNegative.to_string())
            }
        })
        .interact_text()?;

    let currency = prompt_currency(currency)?;

    Ok(EntryTemplate::new(name, start, end, break_minutes, hourly_rate, currency))
}

fn prompt_optional_clock(prompt: Message, default: Option<NaiveTime>) -> Result<Option<NaiveTime>> {
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
