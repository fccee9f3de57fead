use serde::{Deserialize, Serialize};

use super::clinician_edit::ClinicianEdit;
use super::document::DocumentSummary;
use super::prediction::Prediction;

/// Everything one request persists. Written all-or-nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionCommit {
    pub patient_id: i64,
    pub visit_id: Option<i64>,
    /// Carries the updated graph in `prediction.dag`.
    pub prediction: Prediction,
    /// The clinician edit that produced the graph, if any.
    pub edit: Option<ClinicianEdit>,
    /// Fresh summaries to cache under `(patient_id, visit_id)`.
    pub summaries_to_cache: Vec<DocumentSummary>,
}
