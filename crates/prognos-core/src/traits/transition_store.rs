use crate::errors::PrognosResult;
use crate::models::{DiseaseCode, TransitionEdge};

/// Read-only population transition statistics.
pub trait ITransitionStore: Send + Sync {
    /// All recorded transitions leaving `from`.
    fn outgoing(&self, from: &DiseaseCode) -> PrognosResult<Vec<TransitionEdge>>;

    /// P(to | from), if the pair was ever observed.
    fn probability(&self, from: &DiseaseCode, to: &DiseaseCode) -> PrognosResult<Option<f64>>;
}
