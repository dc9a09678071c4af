//! The side effect of a due reminder: show the notification and hand the
//! alarm over to whoever presents it.

use crate::core::trigger::ReminderSink;
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::ui::notification::Notifier;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Alarm waiting to be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAlarm {
    pub event: Event,
    pub settings: Settings,
}

pub struct AlarmLauncher {
    notifier: Arc<dyn Notifier>,
    alarms: mpsc::Sender<PendingAlarm>,
}

impl AlarmLauncher {
    pub fn new(notifier: Arc<dyn Notifier>, alarms: mpsc::Sender<PendingAlarm>) -> Self {
        Self { notifier, alarms }
    }
}

impl ReminderSink for AlarmLauncher {
    fn fire(&self, event: &Event, settings: &Settings) -> AppResult<()> {
        self.notifier.show(event);
        self.alarms
            .try_send(PendingAlarm {
                event: event.clone(),
                settings: settings.clone(),
            })
            .map_err(|e| AppError::Other(format!("cannot launch alarm: {e}")))
    }
}
