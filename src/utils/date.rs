use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_date_strict(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse a date-time using the configured format, falling back to ISO-8601.
pub fn parse_datetime(s: &str, fmt: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, fmt)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;
    Ok((first.year(), first.month()))
}

pub fn current_month() -> (i32, u32) {
    let t = today();
    (t.year(), t.month())
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1);

    while let Some(day) = d {
        if day.month() != month {
            break;
        }
        out.push(day);
        d = day.succ_opt();
    }

    out
}
