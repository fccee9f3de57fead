//! v003: Per-patient graphs, predictions, and the summary cache.

use rusqlite::Connection;

use prognos_core::errors::PrognosResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PrognosResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS agent_memories (
            patient_id    INTEGER PRIMARY KEY,
            dag_json      TEXT NOT NULL,
            edit_action   TEXT,
            edit_reason   TEXT,
            last_updated  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS predictions (
            prediction_id           INTEGER PRIMARY KEY,
            patient_id              INTEGER NOT NULL REFERENCES patients(patient_id),
            visit_id                INTEGER,
            predicted_disease_code  TEXT NOT NULL,
            explanation             TEXT NOT NULL,
            prediction_json         TEXT NOT NULL,
            fallback                INTEGER NOT NULL DEFAULT 0,
            created_at              TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_predictions_patient ON predictions(patient_id, created_at);

        CREATE TABLE IF NOT EXISTS knowledge_summary_cache (
            patient_id    INTEGER NOT NULL,
            visit_id      INTEGER NOT NULL,
            doc_id        INTEGER NOT NULL,
            disease_code  TEXT NOT NULL,
            section       TEXT NOT NULL DEFAULT '',
            summary       TEXT NOT NULL,
            similarity    REAL NOT NULL,
            created_at    TEXT NOT NULL,
            PRIMARY KEY (patient_id, visit_id, doc_id)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
