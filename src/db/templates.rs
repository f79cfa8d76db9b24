//! Entry template storage.
//!
//! Templates are named presets of time entry defaults (start and end
//! time, break minutes, hourly rate, currency) used to prefill new
//! entries for recurring schedules. A template never carries a date;
//! that is supplied when an entry is created from it.

use crate::db::db::Db;
use crate::libs::currency::Currency;
use crate::libs::formatter::parse_clock;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveTime;
use rusqlite::{params, Connection};
use std::str::FromStr;

const SCHEMA_TEMPLATES: &str = "CREATE TABLE IF NOT EXISTS entry_templates (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    start_time TEXT,
    end_time TEXT,
    break_minutes INTEGER NOT NULL DEFAULT 0,
    hourly_rate REAL NOT NULL DEFAULT 0,
    currency TEXT NOT NULL DEFAULT 'USD',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_TEMPLATE: &str = "INSERT INTO entry_templates (name, start_time, end_time, break_minutes, hourly_rate, currency)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// Updates template content while preserving the unique name and the
/// creation timestamp.
const UPDATE_TEMPLATE: &str = "UPDATE entry_templates
    SET start_time = ?2, end_time = ?3, break_minutes = ?4, hourly_rate = ?5, currency = ?6
    WHERE name = ?1";

const DELETE_TEMPLATE: &str = "DELETE FROM entry_templates WHERE name = ?1";

const SELECT_ALL_TEMPLATES: &str = "SELECT id, name, start_time, end_time, break_minutes, hourly_rate, currency
    FROM entry_templates ORDER BY name";

const SELECT_TEMPLATE_BY_NAME: &str = "SELECT id, name, start_time, end_time, break_minutes, hourly_rate, currency
    FROM entry_templates WHERE name = ?1";

const SEARCH_TEMPLATES: &str = "SELECT id, name, start_time, end_time, break_minutes, hourly_rate, currency
    FROM entry_templates WHERE name LIKE ?1 ORDER BY name";

/// A named preset of entry defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryTemplate {
    /// Database-assigned identifier, set on insert.
    pub id: Option<i64>,
    /// Unique template name users reference it by, e.g. "office-day".
    pub name: String,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub break_minutes: i64,
    pub hourly_rate: f64,
    pub currency: Currency,
}

impl EntryTemplate {
    pub fn new(name: String, start: Option<NaiveTime>, end: Option<NaiveTime>, break_minutes: i64, hourly_rate: f64, currency: Currency) -> Self {
        Self {
            id: None,
            name,
            start,
            end,
            break_minutes,
            hourly_rate,
            currency,
        }
    }
}

/// Database manager for entry templates.
pub struct Templates {
    conn: Connection,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_TEMPLATES, [])?;
        Ok(Templates { conn: db.conn })
    }

    /// Creates a new template. Template names are unique across the
    /// whole database; inserting a duplicate name fails.
    pub fn create(&mut self, template: &EntryTemplate) -> Result<()> {
        let affected = self.conn.execute(
            INSERT_TEMPLATE,
            params![
                template.name,
                template.start.map(|t| t.format("%H:%M").to_string()),
                template.end.map(|t| t.format("%H:%M").to_string()),
                template.break_minutes,
                template.hourly_rate,
                template.currency.code(),
            ],
        )?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TemplateCreateFailed));
        }

        Ok(())
    }

    pub fn update(&mut self, template: &EntryTemplate) -> Result<()> {
        let affected = self.conn.execute(
            UPDATE_TEMPLATE,
            params![
                template.name,
                template.start.map(|t| t.format("%H:%M").to_string()),
                template.end.map(|t| t.format("%H:%M").to_string()),
                template.break_minutes,
                template.hourly_rate,
                template.currency.code(),
            ],
        )?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TemplateNotFound(template.name.clone())));
        }

        Ok(())
    }

    /// Deletes a template by name. Entries previously created from the
    /// template are unaffected.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let affected = self.conn.execute(DELETE_TEMPLATE, params![name])?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TemplateNotFound(name.to_string())));
        }

        Ok(())
    }

    /// Returns all templates ordered alphabetically by name.
    pub fn list(&mut self) -> Result<Vec<EntryTemplate>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_TEMPLATES)?;
        let template_iter = stmt.query_map([], Self::map_row)?;

        let mut templates = Vec::new();
        for template in template_iter {
            templates.push(template?);
        }
        Ok(templates)
    }

    /// Finds a template by its exact name.
    pub fn get(&mut self, name: &str) -> Result<Option<EntryTemplate>> {
        let mut stmt = self.conn.prepare(SELECT_TEMPLATE_BY_NAME)?;
        let mut template_iter = stmt.query_map(params![name], Self::map_row)?;

        match template_iter.next() {
            Some(Ok(template)) => Ok(Some(template)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Searches templates by name substring, case-insensitive.
    pub fn search(&mut self, query: &str) -> Result<Vec<EntryTemplate>> {
        let search_pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(SEARCH_TEMPLATES)?;
        let template_iter = stmt.query_map(params![search_pattern], Self::map_row)?;

        let mut templates = Vec::new();
        for template in template_iter {
            templates.push(template?);
        }
        Ok(templates)
    }

    pub fn exists(&mut self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryTemplate> {
        Ok(EntryTemplate {
            id: row.get(0)?,
            name: row.get(1)?,
            start: row.get::<_, Option<String>>(2)?.filter(|s| !s.is_empty()).map(|s| parse_clock(&s).unwrap()),
            end: row.get::<_, Option<String>>(3)?.filter(|s| !s.is_empty()).map(|s| parse_clock(&s).unwrap()),
            break_minutes: row.get(4)?,
            hourly_rate: row.get(5)?,
            currency: Currency::from_str(&row.get::<_, String>(6)?).unwrap_or_default(),
        })
    }
}
