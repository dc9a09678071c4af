//! Notification surface: one channel, one notification slot.
//!
//! Showing replaces whatever is in the slot; clearing empties it.

use crate::models::event::Event;
use crate::ui::messages;
use std::sync::Mutex;

pub const CHANNEL_ID: &str = "reminders";
pub const NOTIFICATION_ID: i32 = 1;
pub const CONTENT_TEXT: &str = "Ring Ring .. Ring Ring";

pub trait Notifier: Send + Sync {
    fn show(&self, event: &Event);
    fn clear(&self);
}

/// Prints notifications on the terminal and remembers which event occupies
/// the slot.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    current: Mutex<Option<Event>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event currently shown, if any.
    pub fn current(&self) -> Option<Event> {
        match self.current.lock() {
            Ok(g) => (*g).clone(),
            Err(p) => (*p.into_inner()).clone(),
        }
    }

    fn set(&self, value: Option<Event>) -> Option<Event> {
        match self.current.lock() {
            Ok(mut g) => std::mem::replace(&mut *g, value),
            Err(p) => std::mem::replace(&mut *p.into_inner(), value),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn show(&self, event: &Event) {
        self.set(Some(event.clone()));
        messages::alert(format!(
            "[{CHANNEL_ID}#{NOTIFICATION_ID}] {} ({}) - {CONTENT_TEXT}",
            event.name,
            event.date.format("%Y-%m-%d %H:%M"),
        ));
    }

    fn clear(&self) {
        if let Some(ev) = self.set(None) {
            messages::info(format!("Notification for '{}' cleared", ev.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ev(name: &str) -> Event {
        Event::new(
            name,
            "x",
            NaiveDateTime::parse_from_str("2024-03-01 09:00", "%Y-%m-%d %H:%M").unwrap(),
            true,
        )
    }

    #[test]
    fn show_replaces_the_single_slot() {
        let n = ConsoleNotifier::new();
        n.show(&ev("first"));
        n.show(&ev("second"));
        assert_eq!(n.current().map(|e| e.name), Some("second".to_string()));
    }

    #[test]
    fn clear_empties_the_slot() {
        let n = ConsoleNotifier::new();
        n.show(&ev("a"));
        n.clear();
        assert!(n.current().is_none());
        // clearing twice is harmless
        n.clear();
    }
}
