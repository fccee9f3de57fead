//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, configurable busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use prognos_core::errors::PrognosResult;

use crate::to_storage_err;

/// Apply performance and safety pragmas to a connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> PrognosResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> PrognosResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
