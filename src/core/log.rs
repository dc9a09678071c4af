use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use crate::utils::table::visible_width;
use ansi_term::Colour;
use rusqlite::Connection;

const OP_WIDTH_MAX: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "settings" => Colour::Yellow,
        "fire" => Colour::RGB(255, 153, 51),
        "dismiss" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::White,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
        let mut stmt = conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// `operation (target)` with only the operation coloured, cut to
    /// `OP_WIDTH_MAX` visible characters.
    fn op_label(e: &LogEntry) -> String {
        let plain = if e.target.is_empty() {
            e.operation.clone()
        } else {
            format!("{} ({})", e.operation, e.target)
        };
        let plain = truncate(&plain, OP_WIDTH_MAX);

        let color = color_for_operation(&e.operation);
        match plain.split_once(' ') {
            Some((op, rest)) => format!("{} {}", color.paint(op), rest),
            None => color.paint(plain.as_str()).to_string(),
        }
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::entries(&pool.conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries.iter().map(Self::op_label).collect();
        let op_w = labels.iter().map(|l| visible_width(l)).max().unwrap_or(10);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for (e, label) in entries.iter().zip(&labels) {
            let padding = " ".repeat(op_w.saturating_sub(visible_width(label)));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, e.date, label, padding, e.message,
            );
        }

        Ok(())
    }
}
