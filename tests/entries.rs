#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use paylog::db::entries::{TimeEntries, TimeEntry};
    use paylog::libs::currency::Currency;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct EntryTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for EntryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            EntryTestContext { _temp_dir: temp_dir }
        }
    }

    fn entry(user: &str, date: (i32, u32, u32), start: (u32, u32), end: Option<(u32, u32)>) -> TimeEntry {
        TimeEntry {
            id: None,
            user: user.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: end.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            break_minutes: 30,
            hourly_rate: 20.0,
            currency: Currency::Usd,
        }
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_entry_crud(_ctx: &mut EntryTestContext) {
        let mut entries = TimeEntries::new().unwrap();

        let id = entries.insert(&entry("crud-user", (2025, 1, 6), (9, 0), Some((17, 0)))).unwrap();

        let mut fetched = entries.fetch(id).unwrap().unwrap();
        assert_eq!(fetched.user, "crud-user");
        assert_eq!(fetched.break_minutes, 30);
        assert_eq!(fetched.currency, Currency::Usd);
        assert_eq!(fetched.end, Some(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));

        fetched.hourly_rate = 27.5;
        fetched.break_minutes = 45;
        entries.update(&fetched).unwrap();

        let verified = entries.fetch(id).unwrap().unwrap();
        assert_eq!(verified.hourly_rate, 27.5);
        assert_eq!(verified.break_minutes, 45);

        entries.delete(id).unwrap();
        assert!(entries.fetch(id).unwrap().is_none());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_ongoing_entry_round_trip(_ctx: &mut EntryTestContext) {
        let mut entries = TimeEntries::new().unwrap();

        let id = entries.insert(&entry("ongoing-user", (2025, 1, 6), (9, 0), None)).unwrap();
        let fetched = entries.fetch(id).unwrap().unwrap();
        assert!(fetched.end.is_none());

        // Closing the entry later keeps everything else intact.
        let mut closed = fetched;
        closed.end = Some(NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        entries.update(&closed).unwrap();

        let verified = entries.fetch(id).unwrap().unwrap();
        assert_eq!(verified.end, Some(NaiveTime::from_hms_opt(17, 30, 0).unwrap()));
        assert_eq!(verified.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_fetch_range_filters_and_orders(_ctx: &mut EntryTestContext) {
        let mut entries = TimeEntries::new().unwrap();

        entries.insert(&entry("range-user", (2025, 1, 20), (9, 0), Some((17, 0)))).unwrap();
        entries.insert(&entry("range-user", (2025, 1, 6), (13, 0), Some((17, 0)))).unwrap();
        entries.insert(&entry("range-user", (2025, 1, 6), (8, 0), Some((12, 0)))).unwrap();
        entries.insert(&entry("range-user", (2025, 2, 3), (9, 0), Some((17, 0)))).unwrap();

        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let fetched = entries.fetch_range("range-user", from, to).unwrap();

        assert_eq!(fetched.len(), 3);
        assert_eq!(fetched[0].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(fetched[0].start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(fetched[1].start, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(fetched[2].date, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_entries_are_isolated_per_user(_ctx: &mut EntryTestContext) {
        let mut entries = TimeEntries::new().unwrap();

        entries.insert(&entry("alice-iso", (2025, 1, 6), (9, 0), Some((17, 0)))).unwrap();
        entries.insert(&entry("bob-iso", (2025, 1, 6), (9, 0), Some((17, 0)))).unwrap();

        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        let alice = entries.fetch_range("alice-iso", from, to).unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].user, "alice-iso");
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_fetch_latest_returns_most_recent_insert(_ctx: &mut EntryTestContext) {
        let mut entries = TimeEntries::new().unwrap();

        assert!(entries.fetch_latest("latest-user").unwrap().is_none());

        entries.insert(&entry("latest-user", (2025, 1, 6), (9, 0), Some((17, 0)))).unwrap();
        let mut second = entry("latest-user", (2025, 1, 2), (10, 0), Some((16, 0)));
        second.hourly_rate = 31.0;
        second.currency = Currency::Eur;
        entries.insert(&second).unwrap();

        // Most recent by creation, not by date.
        let latest = entries.fetch_latest("latest-user").unwrap().unwrap();
        assert_eq!(latest.hourly_rate, 31.0);
        assert_eq!(latest.currency, Currency::Eur);
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_update_missing_entry_fails(_ctx: &mut EntryTestContext) {
        let mut entries = TimeEntries::new().unwrap();

        let mut ghost = entry("ghost-user", (2025, 1, 6), (9, 0), Some((17, 0)));
        ghost.id = Some(9999);
        assert!(entries.update(&ghost).is_err());
        assert!(entries.delete(9999).is_err());
    }
}
