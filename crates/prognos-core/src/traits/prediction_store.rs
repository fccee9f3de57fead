use crate::errors::PrognosResult;
use crate::models::{CausalGraph, DocumentSummary, PredictionCommit};

/// Durable per-patient state: graphs, predictions, and cached summaries.
pub trait IPredictionStore: Send + Sync {
    /// The patient's current graph, if one was ever stored.
    fn load_graph(&self, patient_id: i64) -> PrognosResult<Option<CausalGraph>>;

    /// Summaries cached for a visit, best first. Empty on miss.
    fn cached_summaries(&self, patient_id: i64, visit_id: i64)
        -> PrognosResult<Vec<DocumentSummary>>;

    /// Persist prediction, graph, and summaries atomically. Returns the prediction id.
    fn commit(&self, commit: &PredictionCommit) -> PrognosResult<i64>;
}
