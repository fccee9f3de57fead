//! Candidate generation from population transition statistics.

use tracing::debug;

use prognos_core::errors::PrognosResult;
use prognos_core::models::{Candidate, CandidateSet, DiseaseCode};
use prognos_core::traits::ITransitionStore;

/// Every disease reachable in one transition from `current` with probability
/// strictly above `epsilon`. A target reached from several current diseases
/// keeps its highest probability. Sorted descending, ties in discovery order.
pub fn build_candidate_set(
    store: &dyn ITransitionStore,
    current: &[DiseaseCode],
    epsilon: f64,
) -> PrognosResult<CandidateSet> {
    let mut reachable = Vec::new();
    let mut visited: Vec<&DiseaseCode> = Vec::with_capacity(current.len());

    for code in current {
        if visited.contains(&code) {
            continue;
        }
        visited.push(code);
        reachable.extend(
            store
                .outgoing(code)?
                .into_iter()
                .filter(|t| t.probability > epsilon)
                .map(|t| Candidate {
                    code: t.to,
                    probability: t.probability,
                    support_count: t.support_count,
                }),
        );
    }

    let set = CandidateSet::from_max_merge(reachable);
    debug!(
        current = current.len(),
        candidates = set.len(),
        epsilon,
        "built candidate set"
    );
    Ok(set)
}
