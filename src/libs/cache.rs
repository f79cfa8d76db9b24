//! Client-side entry cache with optimistic mutations.
//!
//! The database is the source of truth; the application only ever holds
//! a cached copy of query results. [`EntryCache`] is a small state
//! container over an [`EntryStore`]: reads go through the cache keyed by
//! query parameters, mutations are applied to the cached copies first
//! and rolled back if the store rejects them. No global mutable state is
//! involved; each command owns its own cache instance.

use crate::db::entries::TimeEntry;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Persistence operations the cache delegates to.
///
/// Implemented by [`crate::db::entries::TimeEntries`]; tests substitute
/// an in-memory store to exercise rollback without a database.
pub trait EntryStore {
    fn fetch_range(&mut self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>>;
    fn insert(&mut self, entry: &TimeEntry) -> Result<i64>;
    fn update(&mut self, entry: &TimeEntry) -> Result<()>;
    fn delete(&mut self, id: i64) -> Result<()>;
}

/// Cache key: the parameters of a range read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryQuery {
    pub user: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl EntryQuery {
    pub fn new(user: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        Self { user: user.into(), from, to }
    }

    fn matches(&self, entry: &TimeEntry) -> bool {
        entry.user == self.user && entry.date >= self.from && entry.date <= self.to
    }
}

/// Saved pre-mutation state of every affected cached query.
struct PendingMutation {
    saved: Vec<(EntryQuery, Vec<TimeEntry>)>,
}

/// Read-through cache over an [`EntryStore`].
pub struct EntryCache<S: EntryStore> {
    store: S,
    data: HashMap<EntryQuery, Vec<TimeEntry>>,
    pending: Vec<PendingMutation>,
}

impl<S: EntryStore> EntryCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            data: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Returns the cached rows for a query, reading through to the
    /// store on the first request.
    pub fn fetch(&mut self, query: &EntryQuery) -> Result<Vec<TimeEntry>> {
        if let Some(rows) = self.data.get(query) {
            return Ok(rows.clone());
        }
        let rows = self.store.fetch_range(&query.user, query.from, query.to)?;
        self.data.insert(query.clone(), rows.clone());
        Ok(rows)
    }

    /// Inserts an entry, applying it optimistically to every cached
    /// query it falls into. On store failure the cached copies are
    /// restored and the error propagates.
    pub fn insert(&mut self, entry: &TimeEntry) -> Result<i64> {
        self.begin(|query, _| query.matches(entry));
        for (query, rows) in self.data.iter_mut() {
            if query.matches(entry) {
                rows.push(entry.clone());
                rows.sort_by_key(|e| (e.date, e.start));
            }
        }

        match self.store.insert(entry) {
            Ok(id) => {
                self.commit();
                // The optimistic copy was cached without an id; stamp
                // the assigned one so later mutations can find it.
                for rows in self.data.values_mut() {
                    for row in rows.iter_mut() {
                        if row.id.is_none() && row.date == entry.date && row.start == entry.start {
                            row.id = Some(id);
                        }
                    }
                }
                Ok(id)
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Updates an entry in place, optimistically rewriting every cached
    /// query that holds it or should now hold it.
    pub fn update(&mut self, entry: &TimeEntry) -> Result<()> {
        let id = entry.id;
        self.begin(|query, rows| query.matches(entry) || rows.iter().any(|e| e.id == id));
        for (query, rows) in self.data.iter_mut() {
            rows.retain(|e| e.id != id);
            if query.matches(entry) {
                rows.push(entry.clone());
                rows.sort_by_key(|e| (e.date, e.start));
            }
        }

        match self.store.update(entry) {
            Ok(()) => {
                self.commit();
                Ok(())
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Deletes an entry by id, optimistically dropping it from every
    /// cached query.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.begin(|_, rows| rows.iter().any(|e| e.id == Some(id)));
        for rows in self.data.values_mut() {
            rows.retain(|e| e.id != Some(id));
        }

        match self.store.delete(id) {
            Ok(()) => {
                self.commit();
                Ok(())
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Drops every cached query; the next fetch reads through again.
    pub fn invalidate(&mut self) {
        self.data.clear();
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn begin(&mut self, affected: impl Fn(&EntryQuery, &[TimeEntry]) -> bool) {
        let saved = self
            .data
            .iter()
            .filter(|(query, rows)| affected(query, rows))
            .map(|(query, rows)| (query.clone(), rows.clone()))
            .collect();
        self.pending.push(PendingMutation { saved });
    }

    fn commit(&mut self) {
        self.pending.pop();
    }

    fn rollback(&mut self) {
        if let Some(mutation) = self.pending.pop() {
            for (query, rows) in mutation.saved {
                self.data.insert(query, rows);
            }
        }
    }
}
