//! Date helpers for rendering backend timestamps.
//!
//! The backend sends timestamps as strings in a few shapes (RFC 3339, SQL
//! `YYYY-MM-DD HH:MM:SS`, bare dates). Naive values are taken as UTC.
//! Formatting never fails: unparsable input renders as an empty string.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const UNITS: [(&str, i64); 7] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// `Mar 5, 2024`
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|at| at.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `3 days ago`, `1 hour ago`, `just now`.
#[must_use]
pub fn format_relative_time(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(at) = raw.and_then(parse_timestamp) else {
        return String::new();
    };
    let seconds = (now - at).num_seconds();
    for (unit, unit_seconds) in UNITS {
        let count = seconds / unit_seconds;
        if count == 1 {
            return format!("1 {unit} ago");
        }
        if count > 1 {
            return format!("{count} {unit}s ago");
        }
    }
    "just now".to_owned()
}

#[must_use]
pub fn is_today(raw: Option<&str>, now: DateTime<Utc>) -> bool {
    raw.and_then(parse_timestamp)
        .is_some_and(|at| at.date_naive() == now.date_naive())
}

#[must_use]
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The last millisecond of the day.
#[must_use]
pub fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(at) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn parses_backend_shapes() {
        let expected = at(2024, 3, 5, 14, 30, 0);
        assert_eq!(parse_timestamp("2024-03-05T14:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T14:30:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05 14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05"), Some(at(2024, 3, 5, 0, 0, 0)));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn date_format() {
        assert_eq!(format_date(Some("2024-03-05T14:30:00Z")), "Mar 5, 2024");
        assert_eq!(format_date(Some("2023-12-25")), "Dec 25, 2023");
        assert_eq!(format_date(None), "");
        assert_eq!(format_date(Some("garbage")), "");
    }

    #[test]
    fn relative_time_units() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let rel = |raw: &str| format_relative_time(Some(raw), now);

        assert_eq!(rel("2024-03-10T11:59:30Z"), "30 seconds ago");
        assert_eq!(rel("2024-03-10T11:59:00Z"), "1 minute ago");
        assert_eq!(rel("2024-03-10T09:00:00Z"), "3 hours ago");
        assert_eq!(rel("2024-03-09T12:00:00Z"), "1 day ago");
        assert_eq!(rel("2024-02-25T12:00:00Z"), "2 weeks ago");
        assert_eq!(rel("2022-03-10T12:00:00Z"), "2 years ago");
        assert_eq!(rel("2024-03-10T12:00:00Z"), "just now");
        assert_eq!(rel("2024-03-11T12:00:00Z"), "just now");
        assert_eq!(format_relative_time(None, now), "");
    }

    #[test]
    fn today_check() {
        let now = at(2024, 3, 10, 23, 0, 0);
        assert!(is_today(Some("2024-03-10 00:00:01"), now));
        assert!(!is_today(Some("2024-03-09 23:59:59"), now));
        assert!(!is_today(None, now));
    }

    #[test]
    fn day_bounds() {
        let noon = at(2024, 3, 10, 12, 0, 0);
        assert_eq!(start_of_day(noon), at(2024, 3, 10, 0, 0, 0));
        assert_eq!(
            end_of_day(noon),
            at(2024, 3, 10, 23, 59, 59) + TimeDelta::milliseconds(999)
        );
    }
}
