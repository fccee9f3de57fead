//! Per-patient causal graphs (`agent_memories`).

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use prognos_core::errors::{PrognosResult, StorageError};
use prognos_core::models::{CausalGraph, ClinicianEdit};

use crate::to_storage_err;

pub fn load_graph(conn: &Connection, patient_id: i64) -> PrognosResult<Option<CausalGraph>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT dag_json FROM agent_memories WHERE patient_id = ?1",
            params![patient_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match raw {
        Some(json) => {
            let graph = serde_json::from_str(&json).map_err(|e| StorageError::CorruptRecord {
                details: format!("graph of patient {patient_id}: {e}"),
            })?;
            Ok(Some(graph))
        }
        None => Ok(None),
    }
}

/// Replace the patient's graph, recording the edit that produced it.
pub fn upsert_graph(
    conn: &Connection,
    patient_id: i64,
    graph: &CausalGraph,
    edit: Option<&ClinicianEdit>,
) -> PrognosResult<()> {
    let json = serde_json::to_string(graph)?;
    conn.execute(
        "INSERT INTO agent_memories (patient_id, dag_json, edit_action, edit_reason, last_updated)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(patient_id) DO UPDATE SET
            dag_json = excluded.dag_json,
            edit_action = excluded.edit_action,
            edit_reason = excluded.edit_reason,
            last_updated = excluded.last_updated",
        params![
            patient_id,
            json,
            edit.map(|e| e.action.as_str()),
            edit.map(|e| e.reason.as_str()),
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
