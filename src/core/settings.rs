//! Settings form: merge user input into the stored record and save it.

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::settings::{has_saved_settings, load_settings, save_settings};
use crate::errors::{AppError, AppResult};
use crate::models::settings::Settings;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::time::parse_time_strict;

/// Raw values as typed by the user; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct SettingsInput {
    pub lead: Option<String>,
    pub stop: Option<String>,
    pub stop_enabled: Option<bool>,
    pub sound: Option<String>,
}

impl SettingsInput {
    pub fn is_empty(&self) -> bool {
        self.lead.is_none() && self.stop.is_none() && self.stop_enabled.is_none() && self.sound.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOutcome {
    Saved(Settings),
    /// Input refused; nothing was written.
    Rejected(String),
}

pub struct SettingsLogic;

impl SettingsLogic {
    pub fn current(pool: &DbPool) -> AppResult<Settings> {
        load_settings(&pool.conn)
    }

    fn merge(current: Settings, input: SettingsInput) -> AppResult<Settings> {
        let mut next = current;
        if let Some(lead) = &input.lead {
            next.first_time_to_start = parse_time_strict(lead)?;
        }
        if let Some(stop) = &input.stop {
            next.time_for_stop_alerting = parse_time_strict(stop)?;
        }
        if let Some(enabled) = input.stop_enabled {
            next.time_for_stop_alerting_enabled = enabled;
        }
        if let Some(sound) = input.sound {
            next.sound_name = sound.trim().to_string();
        }
        Ok(next)
    }

    /// Parse and validate `input` on top of the stored settings, then save.
    /// Malformed or invalid values come back as `Rejected` instead of an
    /// error: the form stays usable and the store is untouched.
    pub fn apply(pool: &mut DbPool, input: SettingsInput) -> AppResult<SettingsOutcome> {
        let current = load_settings(&pool.conn)?;

        let next = match Self::merge(current, input) {
            Ok(s) => s,
            Err(e @ AppError::InvalidTime(_)) => return Ok(SettingsOutcome::Rejected(e.to_string())),
            Err(e) => return Err(e),
        };

        if let Err(msg) = next.validate() {
            return Ok(SettingsOutcome::Rejected(msg));
        }

        save_settings(&pool.conn, &next)?;
        ttlog_quiet(
            &pool.conn,
            "settings",
            "settings",
            &format!(
                "lead {} stop {} ({}) sound '{}'",
                next.first_time_to_start.format("%H:%M"),
                next.time_for_stop_alerting.format("%H:%M"),
                if next.time_for_stop_alerting_enabled { "enabled" } else { "disabled" },
                next.sound_name
            ),
        );

        Ok(SettingsOutcome::Saved(load_settings(&pool.conn)?))
    }

    pub fn print(pool: &DbPool) -> AppResult<()> {
        let s = load_settings(&pool.conn)?;
        let origin = if has_saved_settings(&pool.conn)? { "saved" } else { "defaults" };

        println!("{CYAN}Alert settings{RESET} {GREY}({origin}, v{}){RESET}", s.version);
        println!("  Lead time (first time to start): {}", s.first_time_to_start.format("%H:%M"));
        println!("  Stop alerting at:                {}", s.time_for_stop_alerting.format("%H:%M"));
        println!(
            "  Stop alerting enabled:           {}",
            if s.time_for_stop_alerting_enabled { "yes" } else { "no" }
        );
        println!("  Sound:                           {}", s.sound_name);
        Ok(())
    }
}
