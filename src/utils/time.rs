//! Time utilities: parsing HH:MM, time-of-day differences, formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_time_strict(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_time_strict(s)).transpose()
}

/// Signed difference `target - now` between two times of the same day.
/// Negative when `target` is already past.
pub fn until_time_of_day(now: NaiveTime, target: NaiveTime) -> Duration {
    target.signed_duration_since(now)
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s % 3600) / 60, s % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    #[test]
    fn parses_hh_mm_only() {
        assert_eq!(parse_time("08:05"), NaiveTime::from_hms_opt(8, 5, 0));
        assert!(parse_time("8h05").is_none());
        assert!(parse_time("24:00").is_none());
        assert!(matches!(parse_time_strict("ab:cd"), Err(AppError::InvalidTime(_))));
    }

    #[test]
    fn optional_time_propagates_errors() {
        assert_eq!(parse_optional_time(None).unwrap(), None);
        assert!(parse_optional_time(Some(&"99:99".to_string())).is_err());
    }

    #[test]
    fn until_time_of_day_is_signed() {
        assert_eq!(until_time_of_day(t("10:00"), t("10:05")), Duration::minutes(5));
        assert_eq!(until_time_of_day(t("10:05"), t("10:00")), Duration::minutes(-5));
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::seconds(3725)), "01:02:05");
        assert_eq!(format_duration(Duration::minutes(-2)), "-00:02:00");
    }
}
