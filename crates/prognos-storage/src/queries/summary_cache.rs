//! Durable per-visit summary cache.

use chrono::Utc;
use rusqlite::{params, Connection};

use prognos_core::errors::PrognosResult;
use prognos_core::models::DocumentSummary;

use crate::to_storage_err;

pub fn cached_summaries(
    conn: &Connection,
    patient_id: i64,
    visit_id: i64,
) -> PrognosResult<Vec<DocumentSummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT doc_id, disease_code, section, summary, similarity
             FROM knowledge_summary_cache
             WHERE patient_id = ?1 AND visit_id = ?2
             ORDER BY similarity DESC, doc_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![patient_id, visit_id], |row| {
            Ok(DocumentSummary {
                doc_id: row.get(0)?,
                disease_code: row.get::<_, String>(1)?.into(),
                section: row.get(2)?,
                summary: row.get(3)?,
                similarity: row.get(4)?,
                content: String::new(),
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Cache summaries for a visit. Existing `(patient, visit, doc)` rows are kept.
pub fn insert_summaries(
    conn: &Connection,
    patient_id: i64,
    visit_id: i64,
    summaries: &[DocumentSummary],
) -> PrognosResult<()> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = conn
        .prepare(
            "INSERT OR IGNORE INTO knowledge_summary_cache
                (patient_id, visit_id, doc_id, disease_code, section, summary, similarity, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for s in summaries {
        stmt.execute(params![
            patient_id,
            visit_id,
            s.doc_id,
            s.disease_code.as_str(),
            s.section,
            s.summary,
            s.similarity,
            now,
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}
