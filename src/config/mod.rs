use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

pub const APP_DIR: &str = "eventalert";
pub const CONFIG_FILE: &str = "eventalert.conf";
pub const DB_FILE: &str = "eventalert.sqlite";

/// Upper bound for both durations read from the config: one day.
const MAX_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Half-width of the due window, in minutes.
    #[serde(default = "default_tolerance_minutes")]
    pub tolerance_minutes: i64,
    /// Lower bound for the periodic check interval, in minutes.
    #[serde(default = "default_min_period_minutes")]
    pub min_period_minutes: i64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_tolerance_minutes() -> i64 {
    1
}
fn default_min_period_minutes() -> i64 {
    15
}
fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            tolerance_minutes: default_tolerance_minutes(),
            min_period_minutes: default_min_period_minutes(),
            date_format: default_date_format(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{APP_DIR}"))
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE)
    }

    pub fn tolerance(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.tolerance_minutes.clamp(0, MAX_MINUTES))
    }

    pub fn min_period(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.min_period_minutes.clamp(1, MAX_MINUTES))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join(DB_FILE),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config::with_database(db_path.clone());
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.tolerance_minutes, 1);
        assert_eq!(cfg.min_period_minutes, 15);
        assert_eq!(cfg.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join("eventalert_cfg_roundtrip.conf");
        let _ = fs::remove_file(&path);

        let mut cfg = Config::default();
        cfg.tolerance_minutes = 2;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn negative_tolerance_is_clamped() {
        let mut cfg = Config::default();
        cfg.tolerance_minutes = -5;
        assert_eq!(cfg.tolerance(), chrono::Duration::zero());
    }

    #[test]
    fn oversized_durations_are_capped_at_one_day() {
        let cfg: Config = serde_yaml::from_str(
            "database: /tmp/x.sqlite\ntolerance_minutes: 9223372036854775807\nmin_period_minutes: 9223372036854775807\n",
        )
        .unwrap();
        assert_eq!(cfg.tolerance(), chrono::Duration::days(1));
        assert_eq!(cfg.min_period(), chrono::Duration::days(1));
    }
}
