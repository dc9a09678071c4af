//! Event Store: every read and write of the `events` table.

use crate::errors::{AppError, AppResult};
use crate::models::event::{DB_DATETIME_FMT, Event};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

const EVENT_COLUMNS: &str = "id, name, description, date, remind_me";

pub fn map_row(row: &Row) -> Result<Event> {
    let date_str: String = row.get("date")?;

    let date = NaiveDateTime::parse_from_str(&date_str, DB_DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Event {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        date,
        remind_me: row.get::<_, i64>("remind_me")? == 1,
    })
}

fn collect_events(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn day_bounds(day: NaiveDate) -> (String, String) {
    let start = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = day.and_hms_opt(23, 59, 59).unwrap_or_default();
    (
        start.format(DB_DATETIME_FMT).to_string(),
        end.format(DB_DATETIME_FMT).to_string(),
    )
}

/// Insert a new event, or replace the stored one when `ev.id` is set.
/// Returns the id of the stored row.
pub fn insert_or_replace_event(conn: &Connection, ev: &Event) -> AppResult<i64> {
    conn.execute(
        "INSERT OR REPLACE INTO events (id, name, description, date, remind_me)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.id,
            ev.name,
            ev.description,
            ev.date_db_str(),
            if ev.remind_me { 1 } else { 0 },
        ],
    )?;

    Ok(match ev.id {
        Some(id) => id,
        None => conn.last_insert_rowid(),
    })
}

/// Delete by id. Returns false when nothing was stored under that id.
pub fn delete_event(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn get_event_by_id(conn: &Connection, id: i64) -> AppResult<Option<Event>> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn exists_event_by_id(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT EXISTS (SELECT NULL FROM events WHERE id = ?1)")?;
    let exists: bool = stmt.query_row([id], |row| row.get(0))?;
    Ok(exists)
}

/// Events of a single calendar day, earliest first.
pub fn events_by_day(conn: &Connection, day: NaiveDate) -> AppResult<Vec<Event>> {
    let (start, end) = day_bounds(day);
    collect_events(
        conn,
        &format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC, id ASC"
        ),
        &[&start, &end],
    )
}

/// Every event between two days (inclusive), earliest first. `None` means
/// the whole table.
pub fn events_in_range(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Event>> {
    match bounds {
        Some((from, to)) => {
            let (start, _) = day_bounds(from);
            let (_, end) = day_bounds(to);
            collect_events(
                conn,
                &format!(
                    "SELECT {EVENT_COLUMNS} FROM events
                     WHERE date BETWEEN ?1 AND ?2
                     ORDER BY date ASC, id ASC"
                ),
                &[&start, &end],
            )
        }
        None => collect_events(
            conn,
            &format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC, id ASC"),
            &[],
        ),
    }
}

/// Which days of the month carry at least one event (day-of-month → true).
pub fn event_days_in_month(conn: &Connection, year: i32, month: u32) -> AppResult<BTreeMap<u32, bool>> {
    let prefix = format!("{year:04}-{month:02}-%");
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT substr(date, 1, 10) FROM events
         WHERE date LIKE ?1",
    )?;
    let rows = stmt.query_map([prefix], |row| row.get::<_, String>(0))?;

    let mut out = BTreeMap::new();
    for r in rows {
        let day_str = r?;
        let day = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(day_str.clone()))?;
        out.insert(day.day(), true);
    }
    Ok(out)
}

/// The single most-recent event whose date lies in `[start, end]`.
/// Ties on date are broken by the highest id.
pub fn event_between(
    conn: &Connection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<Option<Event>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date DESC, id DESC
         LIMIT 1"
    ))?;

    let found = stmt
        .query_row(
            [
                start.format(DB_DATETIME_FMT).to_string(),
                end.format(DB_DATETIME_FMT).to_string(),
            ],
            map_row,
        )
        .optional()?;
    Ok(found)
}

pub fn count_events(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?)
}
