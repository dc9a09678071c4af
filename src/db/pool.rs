//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Every trigger invocation opens its own `DbPool`, so overlapping checks
//! never share a connection; the busy timeout lets a reader wait out a
//! concurrent settings write instead of failing.

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
