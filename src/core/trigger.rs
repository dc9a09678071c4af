//! Periodic Trigger: one background check, Idle → Checking → Idle.
//!
//! Each invocation reads the settings, shifts "now" by the configured lead
//! time, asks the matcher for a due event and, on a match, fires the reminder
//! side effect exactly once. Nothing is remembered between invocations: two
//! invocations whose windows overlap may fire twice for the same event.

use crate::core::matcher::find_due_event;
use crate::db::log::ttlog_quiet;
use crate::db::settings::load_settings;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::settings::Settings;
use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

/// What happens when an event is due: show the notification and launch the
/// alarm screen.
pub trait ReminderSink {
    fn fire(&self, event: &Event, settings: &Settings) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Checking,
}

#[derive(Debug)]
pub struct ReminderTrigger {
    tolerance: Duration,
    state: TriggerState,
    fired: u64,
}

impl ReminderTrigger {
    pub fn new(tolerance: Duration) -> Self {
        Self {
            tolerance,
            state: TriggerState::Idle,
            fired: 0,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Number of reminders fired by this trigger so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Run one check. The trigger is back to `Idle` when this returns,
    /// whatever the outcome.
    pub fn invoke(
        &mut self,
        conn: &Connection,
        now: NaiveDateTime,
        sink: &dyn ReminderSink,
    ) -> AppResult<Option<Event>> {
        self.state = TriggerState::Checking;
        let outcome = self.check(conn, now, sink);
        self.state = TriggerState::Idle;
        outcome
    }

    fn check(
        &mut self,
        conn: &Connection,
        now: NaiveDateTime,
        sink: &dyn ReminderSink,
    ) -> AppResult<Option<Event>> {
        let settings = load_settings(conn)?;
        let reference = now + settings.lead_time();

        let Some(event) = find_due_event(conn, reference, self.tolerance)? else {
            return Ok(None);
        };

        sink.fire(&event, &settings)?;
        self.fired += 1;

        ttlog_quiet(
            conn,
            "fire",
            &event.id.map(|id| id.to_string()).unwrap_or_default(),
            &format!("Reminder fired for '{}' at {}", event.name, event.date),
        );

        Ok(Some(event))
    }
}
