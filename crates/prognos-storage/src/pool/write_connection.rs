//! Single connection behind `tokio::sync::Mutex`. All statements are serialized.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use prognos_core::errors::PrognosResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A single connection protected by a mutex shared with async callers.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> PrognosResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> PrognosResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, 5_000)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Synchronous access. Must not be called from inside an async runtime.
    pub fn with_conn_sync<F, T>(&self, f: F) -> PrognosResult<T>
    where
        F: FnOnce(&Connection) -> PrognosResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
