//! Time entry storage.
//!
//! A time entry is one logged work session: date, wall-clock start and
//! end, break minutes, hourly rate, and currency. An entry without an
//! end time is still in progress and carries no billable value yet.
//! Entries are always keyed by the owning user and are never shared.

use crate::db::db::Db;
use crate::libs::cache::EntryStore;
use crate::libs::currency::Currency;
use crate::libs::formatter::parse_clock;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

const SCHEMA_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS time_entries (
    id INTEGER PRIMARY KEY,
    user TEXT NOT NULL,
    date DATE NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT,
    break_minutes INTEGER NOT NULL DEFAULT 0,
    hourly_rate REAL NOT NULL DEFAULT 0,
    currency TEXT NOT NULL DEFAULT 'USD',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_ENTRY: &str = "INSERT INTO time_entries (user, date, start_time, end_time, break_minutes, hourly_rate, currency)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const UPDATE_ENTRY: &str = "UPDATE time_entries
    SET date = ?2, start_time = ?3, end_time = ?4, break_minutes = ?5, hourly_rate = ?6, currency = ?7
    WHERE id = ?1";

const DELETE_ENTRY: &str = "DELETE FROM time_entries WHERE id = ?1";

const SELECT_BY_ID: &str = "SELECT id, user, date, start_time, end_time, break_minutes, hourly_rate, currency
    FROM time_entries WHERE id = ?1";

const SELECT_RANGE: &str = "SELECT id, user, date, start_time, end_time, break_minutes, hourly_rate, currency
    FROM time_entries WHERE user = ?1 AND date BETWEEN ?2 AND ?3
    ORDER BY date, start_time";

const SELECT_LATEST: &str = "SELECT id, user, date, start_time, end_time, break_minutes, hourly_rate, currency
    FROM time_entries WHERE user = ?1 ORDER BY id DESC LIMIT 1";

/// One logged work session.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    /// Database-assigned identifier, set on insert.
    pub id: Option<i64>,
    /// Owning user; entries are never shared across users.
    pub user: String,
    /// Calendar date the session belongs to.
    pub date: NaiveDate,
    /// Wall-clock start of the session.
    pub start: NaiveTime,
    /// Wall-clock end; `None` while work is still in progress. The end
    /// is always interpreted as the same calendar day as the start.
    pub end: Option<NaiveTime>,
    /// Break minutes deducted from the worked duration.
    pub break_minutes: i64,
    /// Pay per worked hour, in `currency`.
    pub hourly_rate: f64,
    pub currency: Currency,
}

/// Database manager for time entry records.
pub struct TimeEntries {
    conn: Connection,
}

impl TimeEntries {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_ENTRIES, [])?;
        Ok(TimeEntries { conn: db.conn })
    }

    /// Inserts a new entry and returns the database-assigned id.
    pub fn insert(&mut self, entry: &TimeEntry) -> Result<i64> {
        let affected = self.conn.execute(
            INSERT_ENTRY,
            params![
                entry.user,
                entry.date.format("%Y-%m-%d").to_string(),
                entry.start.format("%H:%M").to_string(),
                entry.end.map(|t| t.format("%H:%M").to_string()),
                entry.break_minutes,
                entry.hourly_rate,
                entry.currency.code(),
            ],
        )?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::EntryCreateFailed));
        }

        Ok(self.conn.last_insert_rowid())
    }

    /// Updates an existing entry; the id must already be assigned.
    pub fn update(&mut self, entry: &TimeEntry) -> Result<()> {
        let id = entry.id.ok_or_else(|| msg_error_anyhow!(Message::EntryUpdateFailed))?;
        let affected = self.conn.execute(
            UPDATE_ENTRY,
            params![
                id,
                entry.date.format("%Y-%m-%d").to_string(),
                entry.start.format("%H:%M").to_string(),
                entry.end.map(|t| t.format("%H:%M").to_string()),
                entry.break_minutes,
                entry.hourly_rate,
                entry.currency.code(),
            ],
        )?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::EntryNotFound(id)));
        }

        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_ENTRY, params![id])?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::EntryNotFound(id)));
        }

        Ok(())
    }

    pub fn fetch(&mut self, id: i64) -> Result<Option<TimeEntry>> {
        let entry = self.conn.query_row(SELECT_BY_ID, params![id], Self::map_row).optional()?;
        Ok(entry)
    }

    /// Fetches all entries for a user within a closed date range,
    /// ordered by date and start time.
    pub fn fetch_range(&mut self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>> {
        let mut stmt = self.conn.prepare(SELECT_RANGE)?;
        let entry_iter = stmt.query_map(
            params![user, from.format("%Y-%m-%d").to_string(), to.format("%Y-%m-%d").to_string()],
            Self::map_row,
        )?;

        let mut entries = Vec::new();
        for entry in entry_iter {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// Fetches the most recently created entry for a user. Used to carry
    /// rate, currency, and break defaults into the next entry form.
    pub fn fetch_latest(&mut self, user: &str) -> Result<Option<TimeEntry>> {
        let entry = self.conn.query_row(SELECT_LATEST, params![user], Self::map_row).optional()?;
        Ok(entry)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TimeEntry> {
        Ok(TimeEntry {
            id: row.get(0)?,
            user: row.get(1)?,
            date: NaiveDate::parse_from_str(&row.get::<_, String>(2)?, "%Y-%m-%d").unwrap(),
            start: parse_clock(&row.get::<_, String>(3)?).unwrap(),
            end: row.get::<_, Option<String>>(4)?.filter(|s| !s.is_empty()).map(|s| parse_clock(&s).unwrap()),
            break_minutes: row.get(5)?,
            hourly_rate: row.get(6)?,
            currency: Currency::from_str(&row.get::<_, String>(7)?).unwrap_or_default(),
        })
    }
}

impl EntryStore for TimeEntries {
    fn fetch_range(&mut self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>> {
        TimeEntries::fetch_range(self, user, from, to)
    }

    fn insert(&mut self, entry: &TimeEntry) -> Result<i64> {
        TimeEntries::insert(self, entry)
    }

    fn update(&mut self, entry: &TimeEntry) -> Result<()> {
        TimeEntries::update(self, entry)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        TimeEntries::delete(self, id)
    }
}
