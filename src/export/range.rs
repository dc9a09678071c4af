//! `--range` expressions for export.
//!
//! Accepted forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and two of the same form
//! joined by `:` for an interval. `all` means no filter.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn invalid(what: &str, raw: &str) -> AppError {
    AppError::Validation(format!("invalid {what} in range: '{raw}'"))
}

fn last_day_of_month(y: i32, m: u32) -> Option<NaiveDate> {
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// First and last day covered by a single period expression.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid("year", p))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("year", p))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("year", p))?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid("month", p))?;
            let last = last_day_of_month(first.year(), first.month()).ok_or_else(|| invalid("month", p))?;
            Ok((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid("date", p))?;
            Ok((d, d))
        }
        _ => Err(invalid("format", p)),
    }
}

/// `None` for "everything", otherwise inclusive day bounds.
pub fn parse_range(r: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let Some(r) = r.map(str::trim) else {
        return Ok(None);
    };
    if r.is_empty() || r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let (from, to) = match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(AppError::Validation(
                    "start and end of a range must have the same format".into(),
                ));
            }
            (period_bounds(start)?.0, period_bounds(end)?.1)
        }
        None => period_bounds(r)?,
    };

    if from > to {
        return Err(AppError::Validation(format!("range '{r}' ends before it starts")));
    }
    Ok(Some((from, to)))
}
