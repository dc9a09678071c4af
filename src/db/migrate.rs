//! Schema migrations.
//!
//! Each migration is an idempotent step identified by a version string. A
//! step that succeeds is recorded in the `log` table as a
//! `migration_applied` row and is skipped on every later run.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

type Step = fn(&Connection) -> rusqlite::Result<()>;

/// Ordered list of (version, description, step).
const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20240105_0001_create_events",
        "Created events table",
        create_events_table,
    ),
    (
        "20240105_0002_create_settings",
        "Created settings table",
        create_settings_table,
    ),
    (
        "20240312_0003_add_stop_alerting_enabled",
        "Added time_for_stop_alerting_enabled to settings (record v2)",
        add_stop_alerting_enabled,
    ),
    (
        "20240312_0004_events_date_index",
        "Added date index on events",
        create_events_date_index,
    ),
];

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn create_events_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            date         TEXT NOT NULL,
            remind_me    INTEGER NOT NULL DEFAULT 0 CHECK(remind_me IN (0, 1))
        );
        "#,
    )
}

/// Version 1 of the settings record, kept as-is so that the upgrade to v2
/// runs on every installation.
fn create_settings_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id                      INTEGER PRIMARY KEY CHECK(id = 1),
            version                 INTEGER NOT NULL DEFAULT 1,
            first_time_to_start     TEXT NOT NULL,
            time_for_stop_alerting  TEXT NOT NULL,
            sound_name              TEXT NOT NULL
        );
        "#,
    )
}

fn add_stop_alerting_enabled(conn: &Connection) -> rusqlite::Result<()> {
    if !column_exists(conn, "settings", "time_for_stop_alerting_enabled")? {
        conn.execute_batch(
            "ALTER TABLE settings
             ADD COLUMN time_for_stop_alerting_enabled INTEGER NOT NULL DEFAULT 0;",
        )?;
    }
    conn.execute("UPDATE settings SET version = 2 WHERE version < 2", [])?;
    Ok(())
}

fn create_events_date_index(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);")
}

pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

pub fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
/// Returns the number of steps that were applied now.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, description, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        step(&tx).map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [version, description],
        )?;
        tx.commit()?;

        success(format!("Migration applied: {version} → {description}"));
        applied += 1;
    }

    Ok(applied)
}
