#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use paylog::libs::currency::Currency;
    use paylog::libs::formatter::{format_clock, format_hours, format_money, parse_clock};

    #[test]
    fn test_parse_clock_valid() {
        assert_eq!(parse_clock("09:00").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(parse_clock("00:00").unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(parse_clock("23:59").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn test_parse_clock_rejects_malformed_input() {
        for input in ["", "9:00", "09:0", "0900", "24:00", "12:60", "ab:cd", "12:34:56", " 09:00"] {
            assert!(parse_clock(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_format_clock_round_trip() {
        for input in ["00:00", "09:05", "17:30", "23:59"] {
            let time = parse_clock(input).unwrap();
            assert_eq!(format_clock(&time), input);
        }
    }

    #[test]
    fn test_format_money_two_decimal_places() {
        assert_eq!(format_money(150.0, Currency::Usd), "$150.00");
        assert_eq!(format_money(0.0, Currency::Eur), "€0.00");
        assert_eq!(format_money(12.345, Currency::Gbp), "£12.35");
        assert_eq!(format_money(7.5, Currency::Cad), "C$7.50");
    }

    #[test]
    fn test_format_hours_one_decimal_place() {
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(0.0), "0.0");
        assert_eq!(format_hours(8.25), "8.2");
    }

    #[test]
    fn test_currency_codes_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
        assert!("XYZ".parse::<Currency>().is_err());
    }
}
