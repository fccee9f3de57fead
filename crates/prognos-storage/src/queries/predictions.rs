//! Prediction history.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use prognos_core::constants::UNKNOWN_DISEASE_CODE;
use prognos_core::errors::PrognosResult;
use prognos_core::models::Prediction;

use crate::to_storage_err;

/// Insert a prediction row. Returns the prediction id.
pub fn insert_prediction(
    conn: &Connection,
    patient_id: i64,
    visit_id: Option<i64>,
    prediction: &Prediction,
) -> PrognosResult<i64> {
    let top = prediction
        .top_code()
        .map(|c| c.as_str())
        .unwrap_or(UNKNOWN_DISEASE_CODE);
    let json = serde_json::to_string(prediction)?;
    conn.execute(
        "INSERT INTO predictions
            (patient_id, visit_id, predicted_disease_code, explanation, prediction_json, fallback, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            patient_id,
            visit_id,
            top,
            prediction.explanation,
            json,
            prediction.fallback,
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Number of predictions stored for a patient.
pub fn count_predictions(conn: &Connection, patient_id: i64) -> PrognosResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM predictions WHERE patient_id = ?1",
            params![patient_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as u64)
}

/// Most recent prediction for a patient, if any.
pub fn latest_prediction(conn: &Connection, patient_id: i64) -> PrognosResult<Option<Prediction>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT prediction_json FROM predictions
             WHERE patient_id = ?1
             ORDER BY prediction_id DESC
             LIMIT 1",
            params![patient_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
