//! Transition and co-occurrence lookups.

use rusqlite::{params, Connection, OptionalExtension};

use prognos_core::errors::PrognosResult;
use prognos_core::models::{CoOccurrence, DiseaseCode, TransitionEdge};

use crate::to_storage_err;

pub fn outgoing_transitions(conn: &Connection, from: &DiseaseCode) -> PrognosResult<Vec<TransitionEdge>> {
    let mut stmt = conn
        .prepare(
            "SELECT to_disease, transition_prob, support_count
             FROM transition_matrix
             WHERE from_disease = ?1
             ORDER BY transition_prob DESC, to_disease",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![from.as_str()], |row| {
            Ok(TransitionEdge {
                from: from.clone(),
                to: DiseaseCode::new(row.get::<_, String>(0)?),
                probability: row.get(1)?,
                support_count: row.get::<_, i64>(2)?.max(0) as u64,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn transition_probability(
    conn: &Connection,
    from: &DiseaseCode,
    to: &DiseaseCode,
) -> PrognosResult<Option<f64>> {
    conn.query_row(
        "SELECT transition_prob FROM transition_matrix WHERE from_disease = ?1 AND to_disease = ?2",
        params![from.as_str(), to.as_str()],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn co_occurrence(
    conn: &Connection,
    a: &DiseaseCode,
    b: &DiseaseCode,
) -> PrognosResult<Option<CoOccurrence>> {
    conn.query_row(
        "SELECT co_occurrence_count, total_patients
         FROM diagnosis_matrix
         WHERE disease_a = ?1 AND disease_b = ?2",
        params![a.as_str(), b.as_str()],
        |row| {
            Ok(CoOccurrence {
                disease_a: a.clone(),
                disease_b: b.clone(),
                count: row.get::<_, i64>(0)?.max(0) as u64,
                total_population: row.get::<_, i64>(1)?.max(0) as u64,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn upsert_transition(
    conn: &Connection,
    from: &str,
    to: &str,
    probability: f64,
    support_count: u64,
) -> PrognosResult<()> {
    conn.execute(
        "INSERT INTO transition_matrix (from_disease, to_disease, transition_prob, support_count)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(from_disease, to_disease) DO UPDATE SET
            transition_prob = excluded.transition_prob,
            support_count = excluded.support_count",
        params![from, to, probability, support_count as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn upsert_co_occurrence(
    conn: &Connection,
    a: &str,
    b: &str,
    count: u64,
    total_population: u64,
) -> PrognosResult<()> {
    conn.execute(
        "INSERT INTO diagnosis_matrix (disease_a, disease_b, co_occurrence_count, total_patients)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(disease_a, disease_b) DO UPDATE SET
            co_occurrence_count = excluded.co_occurrence_count,
            total_patients = excluded.total_patients",
        params![a, b, count as i64, total_population as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
