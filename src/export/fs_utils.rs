use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Whether `path` may be written. An existing file is only replaced with
/// `force` or after the user confirms.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<bool> {
    if !path.exists() || force {
        return Ok(true);
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
    if confirmed {
        info("Existing file will be overwritten.");
    }
    Ok(confirmed)
}
