use crate::errors::PrognosResult;
use crate::models::PatientHistory;

/// Source of a patient's visit diagnoses.
pub trait IPatientHistory: Send + Sync {
    /// Chronological history. Empty when the patient has no visits.
    fn history(&self, patient_id: i64) -> PrognosResult<PatientHistory>;
}
