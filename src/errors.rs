//! Unified application error type.
//! All modules (db, core, scheduler, cli) return AppError so that store
//! failures and user input errors travel the same way up to `main`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related (transient, caller may retry)
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors (user-correctable)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No event found with id {0}")]
    EventNotFound(i64),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures the user can fix by changing the input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_) | AppError::InvalidTime(_) | AppError::Validation(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
