//! v001: clinical history (patients, visits, diagnoses).

use rusqlite::Connection;

use prognos_core::errors::PrognosResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PrognosResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS patients (
            patient_id  INTEGER PRIMARY KEY,
            name        TEXT,
            dob         TEXT,
            gender      TEXT
        );

        CREATE TABLE IF NOT EXISTS visits (
            visit_id    INTEGER PRIMARY KEY,
            patient_id  INTEGER NOT NULL REFERENCES patients(patient_id),
            visit_date  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_visits_patient ON visits(patient_id, visit_date);

        CREATE TABLE IF NOT EXISTS diagnoses (
            diagnosis_id  INTEGER PRIMARY KEY,
            visit_id      INTEGER NOT NULL REFERENCES visits(visit_id),
            disease_code  TEXT NOT NULL,
            disease_name  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_diagnoses_visit ON diagnoses(visit_id);
        CREATE INDEX IF NOT EXISTS idx_diagnoses_code ON diagnoses(disease_code);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
