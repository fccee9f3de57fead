use crate::errors::PrognosResult;
use crate::models::{CoOccurrence, DiseaseCode};

/// Read-only co-occurrence statistics.
pub trait ICoOccurrenceStore: Send + Sync {
    /// Record for the exact ordered pair `(a, b)`.
    ///
    /// Stored rows keep one orientation per unordered pair (`disease_a <
    /// disease_b`), so `(b, a)` finds nothing. Fitting relies on this: an
    /// edge pointing against the stored orientation scores as missing.
    fn lookup(&self, a: &DiseaseCode, b: &DiseaseCode) -> PrognosResult<Option<CoOccurrence>>;
}
