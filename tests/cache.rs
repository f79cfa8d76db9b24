#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use chrono::{NaiveDate, NaiveTime};
    use paylog::db::entries::TimeEntry;
    use paylog::libs::cache::{EntryCache, EntryQuery, EntryStore};
    use paylog::libs::currency::Currency;

    /// In-memory store that counts reads and can be told to reject the
    /// next mutation, for exercising rollback without a database.
    #[derive(Default)]
    struct MockStore {
        rows: Vec<TimeEntry>,
        next_id: i64,
        fetch_calls: usize,
        fail_next: bool,
    }

    impl EntryStore for MockStore {
        fn fetch_range(&mut self, user: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>> {
            self.fetch_calls += 1;
            Ok(self
                .rows
                .iter()
                .filter(|e| e.user == user && e.date >= from && e.date <= to)
                .cloned()
                .collect())
        }

        fn insert(&mut self, entry: &TimeEntry) -> Result<i64> {
            if self.fail_next {
                self.fail_next = false;
                bail!("store rejected insert");
            }
            self.next_id += 1;
            let mut stored = entry.clone();
            stored.id = Some(self.next_id);
            self.rows.push(stored);
            Ok(self.next_id)
        }

        fn update(&mut self, entry: &TimeEntry) -> Result<()> {
            if self.fail_next {
                self.fail_next = false;
                bail!("store rejected update");
            }
            match self.rows.iter_mut().find(|e| e.id == entry.id) {
                Some(row) => {
                    *row = entry.clone();
                    Ok(())
                }
                None => bail!("row not found"),
            }
        }

        fn delete(&mut self, id: i64) -> Result<()> {
            if self.fail_next {
                self.fail_next = false;
                bail!("store rejected delete");
            }
            let before = self.rows.len();
            self.rows.retain(|e| e.id != Some(id));
            if self.rows.len() == before {
                bail!("row not found");
            }
            Ok(())
        }
    }

    fn entry(day: u32, start_hour: u32) -> TimeEntry {
        TimeEntry {
            id: None,
            user: "tester".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            start: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            end: Some(NaiveTime::from_hms_opt(start_hour + 8, 0, 0).unwrap()),
            break_minutes: 30,
            hourly_rate: 20.0,
            currency: Currency::Usd,
        }
    }

    fn january() -> EntryQuery {
        EntryQuery::new(
            "tester",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
    }

    #[test]
    fn test_fetch_reads_through_once() {
        let mut store = MockStore::default();
        store.insert(&entry(6, 9)).unwrap();
        let mut cache = EntryCache::new(store);

        let first = cache.fetch(&january()).unwrap();
        let second = cache.fetch(&january()).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.store_mut().fetch_calls, 1);
    }

    #[test]
    fn test_insert_updates_cached_queries_without_refetch() {
        let mut cache = EntryCache::new(MockStore::default());

        assert!(cache.fetch(&january()).unwrap().is_empty());
        let id = cache.insert(&entry(6, 9)).unwrap();

        let rows = cache.fetch(&january()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, Some(id));
        // The second fetch was served from cache.
        assert_eq!(cache.store_mut().fetch_calls, 1);
    }

    #[test]
    fn test_insert_outside_cached_range_leaves_cache_untouched() {
        let mut cache = EntryCache::new(MockStore::default());

        assert!(cache.fetch(&january()).unwrap().is_empty());
        let mut outside = entry(6, 9);
        outside.date = NaiveDate::from_ymd_opt(2025, 2, 6).unwrap();
        cache.insert(&outside).unwrap();

        assert!(cache.fetch(&january()).unwrap().is_empty());
    }

    #[test]
    fn test_failed_insert_rolls_back_cached_rows() {
        let mut cache = EntryCache::new(MockStore::default());

        assert!(cache.fetch(&january()).unwrap().is_empty());
        cache.store_mut().fail_next = true;

        assert!(cache.insert(&entry(6, 9)).is_err());

        // The optimistic row was rolled back; nothing reached the store.
        assert!(cache.fetch(&january()).unwrap().is_empty());
        assert!(cache.store_mut().rows.is_empty());
    }

    #[test]
    fn test_update_rewrites_cached_row() {
        let mut cache = EntryCache::new(MockStore::default());
        let id = cache.insert(&entry(6, 9)).unwrap();
        cache.fetch(&january()).unwrap();

        let mut updated = entry(6, 9);
        updated.id = Some(id);
        updated.hourly_rate = 25.0;
        cache.update(&updated).unwrap();

        let rows = cache.fetch(&january()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hourly_rate, 25.0);
    }

    #[test]
    fn test_failed_update_rolls_back_cached_rows() {
        let mut cache = EntryCache::new(MockStore::default());
        let id = cache.insert(&entry(6, 9)).unwrap();
        cache.fetch(&january()).unwrap();

        let mut updated = entry(6, 9);
        updated.id = Some(id);
        updated.hourly_rate = 99.0;
        cache.store_mut().fail_next = true;

        assert!(cache.update(&updated).is_err());

        let rows = cache.fetch(&january()).unwrap();
        assert_eq!(rows[0].hourly_rate, 20.0);
    }

    #[test]
    fn test_delete_drops_cached_row() {
        let mut cache = EntryCache::new(MockStore::default());
        let id = cache.insert(&entry(6, 9)).unwrap();
        cache.fetch(&january()).unwrap();

        cache.delete(id).unwrap();

        assert!(cache.fetch(&january()).unwrap().is_empty());
        assert_eq!(cache.store_mut().fetch_calls, 1);
    }

    #[test]
    fn test_failed_delete_rolls_back_cached_rows() {
        let mut cache = EntryCache::new(MockStore::default());
        let id = cache.insert(&entry(6, 9)).unwrap();
        cache.fetch(&january()).unwrap();

        cache.store_mut().fail_next = true;
        assert!(cache.delete(id).is_err());

        let rows = cache.fetch(&january()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(cache.store_mut().rows.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let mut store = MockStore::default();
        store.insert(&entry(6, 9)).unwrap();
        let mut cache = EntryCache::new(store);

        cache.fetch(&january()).unwrap();
        cache.invalidate();
        cache.fetch(&january()).unwrap();

        assert_eq!(cache.store_mut().fetch_calls, 2);
    }
}
