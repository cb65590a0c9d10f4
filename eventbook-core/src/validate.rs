//! Shape checks for dates, clock times, and email addresses.

use chrono::{DateTime, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("time regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Parse a stored date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (its date part), or the
/// US locale form `M/D/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok())
}

pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Parse a 24-hour `HH:MM` clock time (the hour may be a single digit).
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(s)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

pub fn is_valid_time(s: &str) -> bool {
    TIME_RE.is_match(s)
}

/// `local@domain.tld`, surrounding whitespace ignored.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Minutes since midnight, or `None` if the string is not a clock time.
pub fn minutes_of_day(s: &str) -> Option<i64> {
    let (h, m) = s.trim().split_once(':')?;
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    Some(h * 60 + m)
}

/// Render a minute count as `"{h}h {m}m"`.
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_parse() {
        assert_eq!(
            parse_date("2099-01-01"),
            NaiveDate::from_ymd_opt(2099, 1, 1)
        );
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("tomorrow").is_none());
    }

    #[test]
    fn rfc3339_and_locale_dates_parse() {
        assert_eq!(
            parse_date("2026-03-20T15:00:00Z"),
            NaiveDate::from_ymd_opt(2026, 3, 20)
        );
        assert_eq!(parse_date("3/20/2026"), NaiveDate::from_ymd_opt(2026, 3, 20));
    }

    #[test]
    fn clock_times() {
        assert!(is_valid_time("09:00"));
        assert!(is_valid_time("9:05"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
        assert!(!is_valid_time("9am"));
        assert!(!is_valid_time("09:00:00"));
        assert_eq!(parse_time("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
    }

    #[test]
    fn emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("  user@example.com "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a b@example.com"));
    }

    #[test]
    fn durations() {
        assert_eq!(minutes_of_day("10:30"), Some(630));
        assert_eq!(minutes_of_day("later"), None);
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(15), "0h 15m");
    }
}
