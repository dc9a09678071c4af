//! Event create / update / delete, with validation and audit logging.

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_event, get_event_by_id, insert_or_replace_event};
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use chrono::{NaiveDate, NaiveTime};

/// Fields to change on an existing event; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct EventChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub day: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub remind_me: Option<bool>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.day.is_none()
            && self.time.is_none()
            && self.remind_me.is_none()
    }

    fn apply_to(self, ev: &mut Event) {
        if let Some(name) = self.name {
            ev.name = name;
        }
        if let Some(desc) = self.description {
            ev.description = desc;
        }
        let day = self.day.unwrap_or_else(|| ev.day());
        let time = self.time.unwrap_or_else(|| ev.time());
        ev.date = day.and_time(time);
        if let Some(remind) = self.remind_me {
            ev.remind_me = remind;
        }
    }
}

fn validate(ev: &Event) -> AppResult<()> {
    let missing = ev.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Please fill the required field(s): {}",
            missing.join(", ")
        )))
    }
}

pub struct EventLogic;

impl EventLogic {
    /// Store a new event and return its id.
    pub fn add(pool: &mut DbPool, event: Event) -> AppResult<i64> {
        validate(&event)?;
        let event = Event { id: None, ..event };
        let id = insert_or_replace_event(&pool.conn, &event)?;

        ttlog_quiet(
            &pool.conn,
            "add",
            &id.to_string(),
            &format!("'{}' on {}", event.name, event.date.format("%Y-%m-%d %H:%M")),
        );
        Ok(id)
    }

    pub fn edit(pool: &mut DbPool, id: i64, changes: EventChanges) -> AppResult<Event> {
        let mut event = get_event_by_id(&pool.conn, id)?.ok_or(AppError::EventNotFound(id))?;

        if changes.is_empty() {
            return Err(AppError::Validation("Nothing to change".into()));
        }

        changes.apply_to(&mut event);
        validate(&event)?;
        insert_or_replace_event(&pool.conn, &event)?;

        ttlog_quiet(
            &pool.conn,
            "edit",
            &id.to_string(),
            &format!(
                "'{}' on {} (remind {})",
                event.name,
                event.date.format("%Y-%m-%d %H:%M"),
                if event.remind_me { "on" } else { "off" }
            ),
        );
        Ok(event)
    }

    /// Remove an event, returning what was stored.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Event> {
        let event = get_event_by_id(&pool.conn, id)?.ok_or(AppError::EventNotFound(id))?;
        delete_event(&pool.conn, id)?;

        ttlog_quiet(&pool.conn, "del", &id.to_string(), &format!("'{}' deleted", event.name));
        Ok(event)
    }
}
