#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use paylog::db::entries::TimeEntry;
    use paylog::libs::currency::Currency;
    use paylog::libs::report::{aggregate, month_bounds, render_text};

    const EPSILON: f64 = 1e-9;

    fn entry(date: (i32, u32, u32), start: (u32, u32), end: Option<(u32, u32)>, break_minutes: i64, rate: f64, currency: Currency) -> TimeEntry {
        TimeEntry {
            id: None,
            user: "tester".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: end.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            break_minutes,
            hourly_rate: rate,
            currency,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_report() {
        assert!(aggregate(&[], date(2025, 1, 1), date(2025, 1, 31)).is_none());
    }

    #[test]
    fn test_totals_and_average_rate() {
        // 7.5h @ $20 plus 3h @ $20
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((17, 0)), 30, 20.0, Currency::Usd),
            entry((2025, 1, 7), (9, 0), Some((12, 0)), 0, 20.0, Currency::Usd),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.entries.len(), 2);
        assert!((report.total_hours - 10.5).abs() < EPSILON);
        assert!((report.total_earnings - 210.0).abs() < EPSILON);
        assert!((report.average_rate - 20.0).abs() < EPSILON);
        assert_eq!(report.currency, Currency::Usd);
        assert!(!report.is_mixed_currency());
    }

    #[test]
    fn test_ongoing_entries_are_excluded() {
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((17, 0)), 30, 20.0, Currency::Usd),
            entry((2025, 1, 6), (18, 0), None, 0, 20.0, Currency::Usd),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert!((report.total_earnings - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_only_ongoing_entries_yields_no_report() {
        let entries = vec![entry((2025, 1, 6), (9, 0), None, 0, 20.0, Currency::Usd)];
        assert!(aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).is_none());
    }

    #[test]
    fn test_date_range_filter_is_inclusive() {
        let entries = vec![
            entry((2025, 1, 1), (9, 0), Some((10, 0)), 0, 10.0, Currency::Usd),
            entry((2025, 1, 15), (9, 0), Some((10, 0)), 0, 10.0, Currency::Usd),
            entry((2025, 1, 31), (9, 0), Some((10, 0)), 0, 10.0, Currency::Usd),
            entry((2025, 2, 1), (9, 0), Some((10, 0)), 0, 10.0, Currency::Usd),
            entry((2024, 12, 31), (9, 0), Some((10, 0)), 0, 10.0, Currency::Usd),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.entries.len(), 3);
        assert!((report.total_hours - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_range_filtering_to_nothing_yields_no_report() {
        let entries = vec![entry((2025, 3, 6), (9, 0), Some((17, 0)), 0, 20.0, Currency::Usd)];
        assert!(aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).is_none());
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((17, 0)), 30, 21.5, Currency::Usd),
            entry((2025, 1, 7), (8, 15), Some((12, 45)), 15, 19.0, Currency::Usd),
            entry((2025, 1, 8), (13, 0), Some((18, 30)), 0, 24.75, Currency::Usd),
            entry((2025, 1, 9), (9, 0), Some((9, 10)), 30, 30.0, Currency::Usd),
        ];

        let baseline = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();

        let mut reversed = entries.clone();
        reversed.reverse();
        let mut rotated = entries.clone();
        rotated.rotate_left(2);

        for shuffled in [reversed, rotated] {
            let report = aggregate(&shuffled, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
            assert!((report.total_hours - baseline.total_hours).abs() < EPSILON);
            assert!((report.total_earnings - baseline.total_earnings).abs() < EPSILON);
        }
    }

    #[test]
    fn test_zero_billable_hours_guards_average_rate() {
        // All qualifying entries have break >= worked span; totals are
        // zero but the report still exists and the average is zero.
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((9, 15)), 30, 20.0, Currency::Usd),
            entry((2025, 1, 7), (9, 0), Some((9, 5)), 60, 20.0, Currency::Usd),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.total_hours, 0.0);
        assert_eq!(report.total_earnings, 0.0);
        assert_eq!(report.average_rate, 0.0);
    }

    #[test]
    fn test_plurality_currency_wins() {
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((10, 0)), 0, 20.0, Currency::Eur),
            entry((2025, 1, 7), (9, 0), Some((10, 0)), 0, 20.0, Currency::Usd),
            entry((2025, 1, 8), (9, 0), Some((10, 0)), 0, 20.0, Currency::Eur),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.currency, Currency::Eur);
        assert!(report.is_mixed_currency());
        assert_eq!(report.currencies, vec![Currency::Eur, Currency::Usd]);
    }

    #[test]
    fn test_currency_tie_keeps_first_encountered() {
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((10, 0)), 0, 20.0, Currency::Gbp),
            entry((2025, 1, 7), (9, 0), Some((10, 0)), 0, 20.0, Currency::Jpy),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.currency, Currency::Gbp);
    }

    #[test]
    fn test_daily_series_groups_and_sorts() {
        let entries = vec![
            entry((2025, 1, 8), (13, 0), Some((15, 0)), 0, 10.0, Currency::Usd),
            entry((2025, 1, 6), (9, 0), Some((11, 0)), 0, 10.0, Currency::Usd),
            entry((2025, 1, 8), (9, 0), Some((12, 0)), 0, 10.0, Currency::Usd),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(report.daily.len(), 2);

        assert_eq!(report.daily[0].date, date(2025, 1, 6));
        assert!((report.daily[0].hours - 2.0).abs() < EPSILON);
        assert!((report.daily[0].earnings - 20.0).abs() < EPSILON);

        assert_eq!(report.daily[1].date, date(2025, 1, 8));
        assert!((report.daily[1].hours - 5.0).abs() < EPSILON);
        assert!((report.daily[1].earnings - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_text_rendering_format() {
        let entries = vec![
            entry((2025, 1, 6), (9, 0), Some((17, 0)), 30, 20.0, Currency::Usd),
            entry((2025, 1, 7), (9, 0), Some((12, 0)), 0, 20.0, Currency::Usd),
        ];

        let report = aggregate(&entries, date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let text = render_text(&report);

        let expected = "January 6, 2025 - Work from 09:00 to 17:00 - $150.00\n\
                        January 7, 2025 - Work from 09:00 to 12:00 - $60.00\n\
                        Total Pay: $210.00";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(date(2025, 1, 15)), (date(2025, 1, 1), date(2025, 1, 31)));
        assert_eq!(month_bounds(date(2025, 2, 1)), (date(2025, 2, 1), date(2025, 2, 28)));
        assert_eq!(month_bounds(date(2024, 2, 29)), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(date(2025, 12, 31)), (date(2025, 12, 1), date(2025, 12, 31)));
    }
}
