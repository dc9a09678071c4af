//! Configuration file upgrades.
//!
//! Older installations may carry a config file that predates keys added later
//! (`tolerance_minutes`, `min_period_minutes`, `date_format`). Loading still
//! works thanks to serde defaults, but `config --check`
//! write the missing keys back so the file documents every option.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a key/value document",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Other("default config is not a mapping".into())),
    }
}

/// Keys known to the current version that are absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value, keeping existing values.
/// Returns the names of the keys that were added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (key, value) in defaults {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
        fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_conf(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_eventalert.conf"));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn detects_and_fills_missing_keys() {
        let path = temp_conf("cfg_migrate", "database: /tmp/legacy.sqlite\n");

        let missing = missing_keys(&path).unwrap();
        assert!(missing.contains(&"tolerance_minutes".to_string()));
        assert!(missing.contains(&"date_format".to_string()));
        assert!(!missing.contains(&"database".to_string()));

        let added = fill_missing_keys(&path).unwrap();
        assert_eq!(added.len(), missing.len());

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/legacy.sqlite");
        assert!(missing_keys(&path).unwrap().is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn complete_file_is_left_untouched() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let path = temp_conf("cfg_complete", &yaml);

        assert!(fill_missing_keys(&path).unwrap().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), yaml);

        let _ = fs::remove_file(&path);
    }
}
