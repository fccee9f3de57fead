//! Rebuild population statistics from visit history.

use rusqlite::Connection;
use tracing::info;

use prognos_core::errors::PrognosResult;

use crate::to_storage_err;

/// Row counts written by [`recompute_matrices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCounts {
    pub transitions: usize,
    pub co_occurrences: usize,
}

/// Replace `transition_matrix` and `diagnosis_matrix` with statistics
/// derived from the current visits and diagnoses.
///
/// A transition counts every `(earlier, later)` diagnosis pair of the same
/// patient with a strictly larger visit id and a different code; its
/// probability is the pair count over all transitions leaving the same code.
/// A co-occurrence counts distinct patients having both codes, stored once
/// per unordered pair with `disease_a < disease_b`.
pub fn recompute_matrices(conn: &Connection) -> PrognosResult<MatrixCounts> {
    conn.execute("DELETE FROM transition_matrix", [])
        .map_err(|e| to_storage_err(e.to_string()))?;
    let transitions = conn
        .execute(
            "WITH pair_counts AS (
                SELECT d1.disease_code AS from_disease,
                       d2.disease_code AS to_disease,
                       COUNT(*) AS n
                FROM diagnoses d1
                JOIN diagnoses d2 ON d1.visit_id < d2.visit_id
                JOIN visits v1 ON d1.visit_id = v1.visit_id
                JOIN visits v2 ON d2.visit_id = v2.visit_id
                WHERE v1.patient_id = v2.patient_id
                  AND d1.disease_code != d2.disease_code
                GROUP BY d1.disease_code, d2.disease_code
             ),
             totals AS (
                SELECT from_disease, SUM(n) AS total FROM pair_counts GROUP BY from_disease
             )
             INSERT INTO transition_matrix (from_disease, to_disease, transition_prob, support_count)
             SELECT p.from_disease, p.to_disease, CAST(p.n AS REAL) / t.total, p.n
             FROM pair_counts p
             JOIN totals t ON t.from_disease = p.from_disease",
            [],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute("DELETE FROM diagnosis_matrix", [])
        .map_err(|e| to_storage_err(e.to_string()))?;
    let co_occurrences = conn
        .execute(
            "INSERT INTO diagnosis_matrix (disease_a, disease_b, co_occurrence_count, total_patients)
             SELECT d1.disease_code, d2.disease_code,
                    COUNT(DISTINCT v1.patient_id),
                    (SELECT COUNT(*) FROM patients)
             FROM diagnoses d1
             JOIN diagnoses d2 ON d1.disease_code < d2.disease_code
             JOIN visits v1 ON d1.visit_id = v1.visit_id
             JOIN visits v2 ON d2.visit_id = v2.visit_id
             WHERE v1.patient_id = v2.patient_id
             GROUP BY d1.disease_code, d2.disease_code",
            [],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    info!(transitions, co_occurrences, "recomputed statistics matrices");
    Ok(MatrixCounts {
        transitions,
        co_occurrences,
    })
}
