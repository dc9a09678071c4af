//! Path helpers for user-supplied file arguments (`--db`, `--file`).

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Expanded path as a display string, the form the stores and config keep.
pub fn normalize(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}
