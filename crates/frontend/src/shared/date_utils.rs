//! Utilities for date handling in filters and headers
//!
//! Date inputs exchange values as `YYYY-MM-DD`; an empty input means "no bound".

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Length of the default spend report window, in days before today
pub const DEFAULT_SPEND_WINDOW_DAYS: i64 = 30;

/// Default report range: last 30 days through today
pub fn default_spend_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(DEFAULT_SPEND_WINDOW_DAYS), today)
}

/// First and last day of a month. `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month_start - Duration::days(1)))
}

/// Bounds of the month preceding the month of `date`
pub fn previous_month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    month_bounds(year, month)
}

/// Parse the value of an `<input type="date">`; blank or malformed → `None`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT).ok()
}

pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// "Last refreshed" label, e.g. "2024-03-15 14:02:26"
pub fn format_refreshed_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn now_refreshed_label() -> String {
    format_refreshed_at(&Local::now())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_spend_range() {
        let (from, to) = default_spend_range(date(2024, 3, 15));
        assert_eq!(from, date(2024, 2, 14));
        assert_eq!(to, date(2024, 3, 15));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(2024, 2), Some((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(month_bounds(2023, 12), Some((date(2023, 12, 1), date(2023, 12, 31))));
        assert_eq!(month_bounds(2023, 13), None);
    }

    #[test]
    fn test_previous_month_bounds() {
        assert_eq!(
            previous_month_bounds(date(2024, 1, 20)),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
        assert_eq!(
            previous_month_bounds(date(2024, 3, 31)),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
    }

    #[test]
    fn test_date_input_round_trip() {
        assert_eq!(parse_date_input("2024-01-31"), Some(date(2024, 1, 31)));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("31.01.2024"), None);
        assert_eq!(format_date_input(Some(date(2024, 1, 5))), "2024-01-05");
        assert_eq!(format_date_input(None), "");
    }

    #[test]
    fn test_format_refreshed_at() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_refreshed_at(&at), "2024-03-15 14:02:26");
    }
}
