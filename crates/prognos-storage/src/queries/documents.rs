//! Knowledge documents and their embeddings.

use rusqlite::{params, Connection};

use prognos_core::errors::{PrognosResult, StorageError};
use prognos_core::models::{DiseaseCode, StoredDocument};

use crate::to_storage_err;

/// Insert a document and its embedding. Returns the new doc id.
pub fn insert_document(
    conn: &Connection,
    disease_code: &DiseaseCode,
    section: &str,
    content: &str,
    embedding: &[f32],
) -> PrognosResult<i64> {
    conn.execute(
        "INSERT INTO knowledge_documents (disease_code, section, content) VALUES (?1, ?2, ?3)",
        params![disease_code.as_str(), section, content],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    let doc_id = conn.last_insert_rowid();

    let vector = serde_json::to_string(embedding)?;
    conn.execute(
        "INSERT INTO document_embeddings (doc_id, embedding) VALUES (?1, ?2)",
        params![doc_id, vector],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(doc_id)
}

/// Every document that has an embedding, by doc id.
pub fn list_documents(conn: &Connection) -> PrognosResult<Vec<StoredDocument>> {
    let mut stmt = conn
        .prepare(
            "SELECT d.doc_id, d.disease_code, d.section, d.content, e.embedding
             FROM knowledge_documents d
             JOIN document_embeddings e ON e.doc_id = d.doc_id
             ORDER BY d.doc_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut documents = Vec::new();
    for row in rows {
        let (doc_id, code, section, content, raw) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let embedding: Vec<f32> =
            serde_json::from_str(&raw).map_err(|e| StorageError::CorruptRecord {
                details: format!("embedding of doc {doc_id}: {e}"),
            })?;
        documents.push(StoredDocument {
            doc_id,
            disease_code: code.into(),
            section,
            content,
            embedding,
        });
    }
    Ok(documents)
}
