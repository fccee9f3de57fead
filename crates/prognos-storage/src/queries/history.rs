//! Patients, visits, and diagnoses.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use prognos_core::errors::{PrognosResult, StorageError};
use prognos_core::models::{PatientHistory, VisitDiagnosis};

use crate::to_storage_err;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn insert_patient(conn: &Connection, patient_id: i64, name: Option<&str>) -> PrognosResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO patients (patient_id, name) VALUES (?1, ?2)",
        params![patient_id, name],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn patient_exists(conn: &Connection, patient_id: i64) -> PrognosResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT patient_id FROM patients WHERE patient_id = ?1",
            params![patient_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(found.is_some())
}

pub fn insert_visit(
    conn: &Connection,
    visit_id: i64,
    patient_id: i64,
    visit_date: NaiveDate,
) -> PrognosResult<()> {
    conn.execute(
        "INSERT INTO visits (visit_id, patient_id, visit_date) VALUES (?1, ?2, ?3)",
        params![visit_id, patient_id, visit_date.format(DATE_FORMAT).to_string()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn insert_diagnosis(
    conn: &Connection,
    visit_id: i64,
    disease_code: &str,
    disease_name: Option<&str>,
) -> PrognosResult<()> {
    conn.execute(
        "INSERT INTO diagnoses (visit_id, disease_code, disease_name) VALUES (?1, ?2, ?3)",
        params![visit_id, disease_code, disease_name],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Every diagnosis of the patient, chronological.
pub fn load_history(conn: &Connection, patient_id: i64) -> PrognosResult<PatientHistory> {
    let mut stmt = conn
        .prepare(
            "SELECT v.visit_id, v.visit_date, d.disease_code, d.disease_name
             FROM visits v
             JOIN diagnoses d ON d.visit_id = v.visit_id
             WHERE v.patient_id = ?1
             ORDER BY v.visit_date, v.visit_id, d.diagnosis_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![patient_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut diagnoses = Vec::new();
    for row in rows {
        let (visit_id, date, code, name) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let visit_date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
            StorageError::CorruptRecord {
                details: format!("visit {visit_id} has date '{date}': {e}"),
            }
        })?;
        diagnoses.push(VisitDiagnosis {
            visit_id,
            visit_date,
            disease_code: code.into(),
            disease_name: name,
        });
    }

    Ok(PatientHistory::new(patient_id, diagnoses))
}
