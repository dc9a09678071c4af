use crate::errors::{AppError, AppResult};
use crate::export::{EventExport, notify_export_success};
use std::fs;
use std::path::Path;

pub(crate) fn export_json(rows: &[EventExport], path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
    fs::write(path, json)?;

    notify_export_success("JSON", path, rows.len());
    Ok(())
}

/// Header row comes from the serde field names.
pub(crate) fn export_csv(rows: &[EventExport], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path, rows.len());
    Ok(())
}
