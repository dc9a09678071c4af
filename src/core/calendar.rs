//! Month view: which days carry events.

use crate::db::pool::DbPool;
use crate::db::queries::event_days_in_month;
use crate::errors::AppResult;
use crate::utils::colors::{GREY, RESET, color_for_day};
use crate::utils::date::{all_days_of_month, today};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub struct CalendarLogic;

impl CalendarLogic {
    pub fn event_days(pool: &DbPool, year: i32, month: u32) -> AppResult<BTreeMap<u32, bool>> {
        event_days_in_month(&pool.conn, year, month)
    }

    /// Monday-first grid. Days with events are marked with `*`.
    pub fn render(year: i32, month: u32, marks: &BTreeMap<u32, bool>, today: NaiveDate) -> String {
        let days = all_days_of_month(year, month);
        let Some(first) = days.first() else {
            return String::new();
        };

        let mut out = String::new();
        out.push_str(&format!("{:^28}\n", first.format("%B %Y").to_string()));
        out.push_str(&format!("{GREY} Mo  Tu  We  Th  Fr  Sa  Su{RESET}\n"));

        let offset = first.weekday().num_days_from_monday() as usize;
        out.push_str(&"    ".repeat(offset));

        for (i, d) in days.iter().enumerate() {
            let has = marks.get(&d.day()).copied().unwrap_or(false);
            let color = color_for_day(has, *d == today);
            let mark = if has { '*' } else { ' ' };
            out.push_str(&format!("{color}{:>3}{mark}{RESET}", d.day()));

            if (offset + i + 1) % 7 == 0 {
                out.push('\n');
            }
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    pub fn print(pool: &DbPool, year: i32, month: u32) -> AppResult<()> {
        let marks = Self::event_days(pool, year, month)?;
        print!("{}", Self::render(year, month, &marks, today()));
        println!("\n{} day(s) with events", marks.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_or_replace_event;
    use crate::models::event::Event;
    use crate::utils::table::strip_ansi;
    use chrono::NaiveDateTime;

    #[test]
    fn marks_days_with_events() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        for d in ["2024-02-03 08:00", "2024-02-03 18:00", "2024-02-29 12:00", "2024-03-01 09:00"] {
            let dt = NaiveDateTime::parse_from_str(d, "%Y-%m-%d %H:%M").unwrap();
            insert_or_replace_event(&pool.conn, &Event::new("e", "x", dt, false)).unwrap();
        }

        let marks = CalendarLogic::event_days(&pool, 2024, 2).unwrap();
        assert_eq!(marks.keys().copied().collect::<Vec<_>>(), vec![3, 29]);

        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let grid = CalendarLogic::render(2024, 2, &marks, today);
        let plain = strip_ansi(&grid);
        // February 2024 starts on a Thursday
        let first_week = plain.lines().nth(2).unwrap();
        assert_eq!(first_week, format!("{}  1   2   3*  4 ", " ".repeat(12)));
        assert!(plain.contains("29*"));
    }
}
