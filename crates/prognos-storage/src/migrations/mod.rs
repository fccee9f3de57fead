//! Versioned schema migrations, tracked in `schema_version`.

mod v001_clinical_schema;
mod v002_knowledge_tables;
mod v003_agent_memory;

use rusqlite::{params, Connection};
use tracing::info;

use prognos_core::errors::{PrognosResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> PrognosResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_clinical_schema::migrate),
    (2, v002_knowledge_tables::migrate),
    (3, v003_agent_memory::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 3;

/// Apply every migration newer than the recorded schema version.
/// Each migration runs in its own transaction.
pub fn run_migrations(conn: &Connection) -> PrognosResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        info!(version, "applied migration");
    }

    current_version(conn)
}

/// Highest applied version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> PrognosResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
