use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Storage format of `events.date`: lexical order equals chronological order.
pub const DB_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: Option<i64>,       // ⇔ events.id (assigned on first insert)
    pub name: String,          // ⇔ events.name
    pub description: String,   // ⇔ events.description
    pub date: NaiveDateTime,   // ⇔ events.date (TEXT "YYYY-MM-DDTHH:MM:SS")
    pub remind_me: bool,       // ⇔ events.remind_me (INT 0/1)
}

impl Event {
    /// Build a not-yet-stored event.
    pub fn new(name: &str, description: &str, date: NaiveDateTime, remind_me: bool) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            date,
            remind_me,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.date.time()
    }

    pub fn date_db_str(&self) -> String {
        self.date.format(DB_DATETIME_FMT).to_string()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.date.format("%H:%M").to_string()
    }

    /// Name and description are mandatory.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name.trim().is_empty() {
            out.push("name");
        }
        if self.description.trim().is_empty() {
            out.push("description");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn db_format_sorts_chronologically() {
        let a = Event::new("a", "x", at("2024-01-01 09:05"), true);
        let b = Event::new("b", "x", at("2024-01-01 10:00"), true);
        assert!(a.date_db_str() < b.date_db_str());
        assert_eq!(a.date_db_str(), "2024-01-01T09:05:00");
    }

    #[test]
    fn blank_fields_are_reported() {
        let ev = Event::new("  ", "", at("2024-01-01 09:05"), false);
        assert_eq!(ev.missing_fields(), vec!["name", "description"]);

        let ok = Event::new("Dentist", "Bring card", at("2024-01-01 09:05"), false);
        assert!(ok.missing_fields().is_empty());
    }
}
