//! Settings Store: the single `settings` row (id = 1).
//!
//! Reads fall back to `Settings::default()` when no row exists; writes replace
//! the whole record (last write wins).

use crate::errors::{AppError, AppResult};
use crate::models::settings::{SETTINGS_VERSION, Settings};
use chrono::NaiveTime;
use rusqlite::{Connection, OptionalExtension, params};

const TIME_FMT: &str = "%H:%M";

fn parse_stored_time(raw: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(raw.to_string())),
        )
    })
}

/// Current settings, or the defaults when nothing was saved yet.
pub fn load_settings(conn: &Connection) -> AppResult<Settings> {
    let mut stmt = conn.prepare_cached(
        "SELECT version, first_time_to_start, time_for_stop_alerting,
                time_for_stop_alerting_enabled, sound_name
         FROM settings WHERE id = 1",
    )?;

    let stored = stmt
        .query_row([], |row| {
            let first: String = row.get(1)?;
            let stop: String = row.get(2)?;
            Ok(Settings {
                version: row.get(0)?,
                first_time_to_start: parse_stored_time(&first)?,
                time_for_stop_alerting: parse_stored_time(&stop)?,
                time_for_stop_alerting_enabled: row.get::<_, i64>(3)? == 1,
                sound_name: row.get(4)?,
            })
        })
        .optional()?;

    Ok(stored.unwrap_or_default())
}

/// Replace the stored record wholesale. The row is always written at the
/// current schema version.
pub fn save_settings(conn: &Connection, settings: &Settings) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings
            (id, version, first_time_to_start, time_for_stop_alerting,
             time_for_stop_alerting_enabled, sound_name)
         VALUES (1, ?1, ?2, ?3, ?4, ?5)",
        params![
            SETTINGS_VERSION,
            settings.first_time_to_start.format(TIME_FMT).to_string(),
            settings.time_for_stop_alerting.format(TIME_FMT).to_string(),
            if settings.time_for_stop_alerting_enabled { 1 } else { 0 },
            settings.sound_name,
        ],
    )?;
    Ok(())
}

pub fn has_saved_settings(conn: &Connection) -> AppResult<bool> {
    Ok(conn.query_row("SELECT EXISTS (SELECT NULL FROM settings WHERE id = 1)", [], |row| {
        row.get(0)
    })?)
}
