//! Reminder Matcher: decides whether an event is due around a given instant.

use crate::db::queries::event_between;
use crate::errors::AppResult;
use crate::models::event::Event;
use chrono::{Duration, NaiveDateTime, Timelike};
use rusqlite::Connection;

/// Symmetric window `[at - tolerance, at + tolerance]`.
pub fn due_window(at: NaiveDateTime, tolerance: Duration) -> (NaiveDateTime, NaiveDateTime) {
    (at - tolerance, at + tolerance)
}

/// The most recent event inside the tolerance window around `at`, provided it
/// asked to be reminded. An event in the window with `remind_me == false`
/// hides any earlier one: the lookup picks one event, then checks its flag.
///
/// Read-only; store errors are returned untouched so the caller may retry.
pub fn find_due_event(
    conn: &Connection,
    at: NaiveDateTime,
    tolerance: Duration,
) -> AppResult<Option<Event>> {
    let (start, end) = due_window(at, tolerance);
    // stored dates have whole seconds: round the start up, the end is
    // truncated when formatted
    let found = event_between(conn, ceil_to_second(start), end)?;
    Ok(found.filter(|ev| ev.remind_me))
}

fn ceil_to_second(t: NaiveDateTime) -> NaiveDateTime {
    match t.with_nanosecond(0) {
        Some(whole) if whole < t => whole + Duration::seconds(1),
        Some(whole) => whole,
        None => t,
    }
}
