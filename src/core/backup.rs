use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally as a zip archive.
    /// Returns the path written, or `None` when the user declined to
    /// overwrite an existing file.
    pub fn backup(pool: &DbPool, db_path: &str, dest_file: &str, compress: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress { dest.with_extension("zip") } else { dest.to_path_buf() };
        if !ensure_writable(&final_target, false)? {
            info("Backup cancelled.");
            return Ok(None);
        }

        let written = if compress {
            compress_into(src, &final_target)?
        } else {
            fs::copy(src, dest)?;
            dest.to_path_buf()
        };
        success(format!("Backup created: {}", written.display()));

        ttlog_quiet(
            &pool.conn,
            "backup",
            &written.to_string_lossy(),
            if compress { "Backup created and compressed" } else { "Backup created" },
        );

        Ok(Some(written))
    }
}

fn compress_into(src: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "eventalert.sqlite".to_string());

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name, options).map_err(io::Error::other)?;
    let mut f = fs::File::open(src)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    if fs::metadata(zip_path).map(|m| m.len()).unwrap_or(0) == 0 {
        warning(format!("Compressed backup is empty: {}", zip_path.display()));
    }
    Ok(zip_path.to_path_buf())
}
