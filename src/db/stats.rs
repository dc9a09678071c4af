use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::db::queries::count_events;
use crate::db::settings::has_saved_settings;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW, colorize_optional};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) EVENTS
    //
    let total = count_events(&pool.conn)?;
    let reminding: i64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(remind_me), 0) FROM events",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Total events:{} {}{}{}", CYAN, RESET, GREEN, total, RESET);
    println!("{}• With reminder:{} {}", CYAN, RESET, reminding);

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM events", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM events", [], |row| row.get(0))
        .optional()?
        .flatten();

    let none = colorize_optional("--");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| none.clone()));
    println!("    to:   {}", last.unwrap_or(none));

    //
    // 4) SETTINGS + SCHEMA
    //
    let saved = has_saved_settings(&pool.conn)?;
    println!(
        "{}• Settings:{} {}",
        CYAN,
        RESET,
        if saved { "saved" } else { "defaults" }
    );

    let versions = applied_versions(&pool.conn)?;
    println!("{}• Migrations applied:{} {}", CYAN, RESET, versions.len());
    if let Some(v) = versions.last() {
        println!("    latest: {}", v);
    }

    println!();
    Ok(())
}
