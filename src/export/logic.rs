use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::events_in_range;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::range::parse_range;
use crate::export::{EventExport, ExportFormat};
use crate::ui::messages::{info, warning};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the events selected by `range` to `file`. Returns how many rows
    /// were written; nothing is written when the selection is empty.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = parse_range(range)?;
        if !ensure_writable(path, force)? {
            info("Export cancelled: existing file not overwritten.");
            return Ok(0);
        }

        let rows: Vec<EventExport> = events_in_range(&pool.conn, bounds)?
            .iter()
            .map(EventExport::from)
            .collect();

        if rows.is_empty() {
            warning("No events found for the selected range.");
            return Ok(0);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info(format!("Exporting to {}: {}", format.as_str().to_uppercase(), path.display()));
        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} event(s) exported as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_or_replace_event;
    use crate::models::event::Event;
    use chrono::NaiveDateTime;
    use std::fs;

    fn pool_with_events() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        for (name, date) in [("a", "2024-01-10 09:00"), ("b", "2024-02-10 09:00")] {
            let dt = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M").unwrap();
            insert_or_replace_event(&pool.conn, &Event::new(name, "desc, with comma", dt, true)).unwrap();
        }
        pool
    }

    fn tmp(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("eventalert_unit_{}_{name}", std::process::id()))
    }

    #[test]
    fn csv_export_honours_range() {
        let mut pool = pool_with_events();
        let out = tmp("range.csv");
        let n = ExportLogic::export(&mut pool, ExportFormat::Csv, out.to_str().unwrap(), Some("2024-01"), true)
            .unwrap();
        assert_eq!(n, 1);

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("id,date,time,name,description,remind_me"));
        assert!(text.contains("\"desc, with comma\""));
        assert!(!text.contains(",b,"));
        let _ = fs::remove_file(out);
    }

    #[test]
    fn json_export_writes_array() {
        let mut pool = pool_with_events();
        let out = tmp("all.json");
        ExportLogic::export(&mut pool, ExportFormat::Json, out.to_str().unwrap(), None, true).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
        assert_eq!(parsed[1]["name"], "b");
        let _ = fs::remove_file(out);
    }

    #[test]
    fn relative_path_is_rejected() {
        let mut pool = pool_with_events();
        let err = ExportLogic::export(&mut pool, ExportFormat::Csv, "out.csv", None, true).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }
}
