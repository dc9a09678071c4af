//! Alert preferences: a single versioned record per installation.
//!
//! Version history of the stored record:
//! - v1: lead time, stop-alerting time, sound
//! - v2: adds `time_for_stop_alerting_enabled` (defaults to `false` when
//!   upgrading a v1 row)

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const SETTINGS_VERSION: u32 = 2;

pub const DEFAULT_FIRST_TIME_TO_START: &str = "00:30";
pub const DEFAULT_TIME_FOR_STOP_ALERTING: &str = "00:05";
pub const DEFAULT_SOUND_NAME: &str = "Alarm";

/// The lead time doubles as the check period, which the background
/// scheduler will not run more often than this.
pub const MIN_LEAD_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u32,
    pub first_time_to_start: NaiveTime,
    pub time_for_stop_alerting: NaiveTime,
    pub time_for_stop_alerting_enabled: bool,
    pub sound_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            first_time_to_start: NaiveTime::from_hms_opt(0, 30, 0).unwrap_or(NaiveTime::MIN),
            time_for_stop_alerting: NaiveTime::from_hms_opt(0, 5, 0).unwrap_or(NaiveTime::MIN),
            time_for_stop_alerting_enabled: false,
            sound_name: DEFAULT_SOUND_NAME.to_string(),
        }
    }
}

impl Settings {
    /// `first_time_to_start` read as an hours/minutes offset.
    pub fn lead_time(&self) -> Duration {
        time_as_duration(self.first_time_to_start)
    }

    /// Reject values the settings form would not accept.
    pub fn validate(&self) -> Result<(), String> {
        if self.lead_time() < Duration::minutes(MIN_LEAD_MINUTES) {
            return Err(format!(
                "The time before the first launch should not be less than {MIN_LEAD_MINUTES} minutes"
            ));
        }
        if self.sound_name.trim().is_empty() {
            return Err("Sound name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Hours and minutes of a time-of-day as a duration (seconds ignored).
pub fn time_as_duration(t: NaiveTime) -> Duration {
    Duration::minutes(i64::from(t.hour()) * 60 + i64::from(t.minute()))
}
