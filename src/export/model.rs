use crate::models::event::Event;
use serde::Serialize;

/// Flat row written by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EventExport {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub name: String,
    pub description: String,
    pub remind_me: bool,
}

impl From<&Event> for EventExport {
    fn from(ev: &Event) -> Self {
        Self {
            id: ev.id.unwrap_or_default(),
            date: ev.date_str(),
            time: ev.time_str(),
            name: ev.name.clone(),
            description: ev.description.clone(),
            remind_me: ev.remind_me,
        }
    }
}
