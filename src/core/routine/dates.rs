//! Date parsing and display for `DD-MM-YYYY` exam dates

use chrono::{Local, NaiveDate};
use std::cmp::Ordering;

/// Long display format, e.g. "Tuesday, March 5, 2024"
const LONG_FORMAT: &str = "%A, %B %-d, %Y";

/// Zero-padded dataset format
const DATASET_FORMAT: &str = "%d-%m-%Y";

/// Parse a `DD-MM-YYYY` date. Zero padding is optional and each component is
/// trimmed. Returns `None` for anything that is not a real calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Long form of a calendar date
#[must_use]
pub fn format_long(date: NaiveDate) -> String {
    date.format(LONG_FORMAT).to_string()
}

/// Long form of a raw dataset date; malformed dates are returned unchanged
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_date(raw).map_or_else(|| raw.to_string(), format_long)
}

/// Render a date back into the zero-padded dataset form
#[must_use]
pub fn format_for_comparison(date: NaiveDate) -> String {
    date.format(DATASET_FORMAT).to_string()
}

/// Chronological order of raw dates; malformed dates sort after all valid ones
#[must_use]
pub fn compare_raw_dates(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(raw: &str) -> (bool, Option<NaiveDate>) {
    let parsed = parse_date(raw);
    (parsed.is_none(), parsed)
}

/// The current local calendar date
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_unpadded() {
        assert_eq!(parse_date("5-3-2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_date("05-03-2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_date(" 05 - 03 - 2024 "), NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_date("").is_none());
        assert!(parse_date("2024/03/05").is_none());
        assert!(parse_date("31-02-2024").is_none());
        assert!(parse_date("01-03-2024-1").is_none());
        assert!(parse_date("TBA").is_none());
    }

    #[test]
    fn test_long_format() {
        assert_eq!(format_date("05-03-2024"), "Tuesday, March 5, 2024");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_format_for_comparison_round_trips_order() {
        let d1 = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(format_for_comparison(d1), "31-12-2024");
        let p1 = parse_date(&format_for_comparison(d1)).unwrap();
        let p2 = parse_date(&format_for_comparison(d2)).unwrap();
        assert!(p1 < p2);
    }

    #[test]
    fn test_malformed_sorts_last() {
        let mut dates = vec!["TBA", "10-03-2024", "2-03-2024"];
        dates.sort_by(|a, b| compare_raw_dates(a, b));
        assert_eq!(dates, vec!["2-03-2024", "10-03-2024", "TBA"]);
    }
}
