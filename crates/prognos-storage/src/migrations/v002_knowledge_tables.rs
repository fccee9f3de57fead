//! v002: Population statistics and the knowledge corpus.

use rusqlite::Connection;

use prognos_core::errors::PrognosResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PrognosResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS transition_matrix (
            from_disease     TEXT NOT NULL,
            to_disease       TEXT NOT NULL,
            transition_prob  REAL NOT NULL,
            support_count    INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (from_disease, to_disease)
        );

        CREATE TABLE IF NOT EXISTS diagnosis_matrix (
            disease_a            TEXT NOT NULL,
            disease_b            TEXT NOT NULL,
            co_occurrence_count  INTEGER NOT NULL DEFAULT 0,
            total_patients       INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (disease_a, disease_b)
        );

        CREATE TABLE IF NOT EXISTS knowledge_documents (
            doc_id        INTEGER PRIMARY KEY,
            disease_code  TEXT NOT NULL,
            section       TEXT NOT NULL,
            content       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_code ON knowledge_documents(disease_code);

        CREATE TABLE IF NOT EXISTS document_embeddings (
            doc_id     INTEGER PRIMARY KEY REFERENCES knowledge_documents(doc_id) ON DELETE CASCADE,
            embedding  TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
