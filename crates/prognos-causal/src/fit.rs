//! Co-occurrence fit: a Bernoulli approximation of each edge's
//! log-likelihood, not exact inference.

use prognos_core::constants::{FIT_SCORE_EMPTY, FIT_SCORE_MISSING};
use prognos_core::errors::PrognosResult;
use prognos_core::models::{CausalGraph, CoOccurrence};
use prognos_core::traits::ICoOccurrenceStore;

/// `ln(count / total)` for a usable record, −10 for an empty one, −5 when no
/// record exists.
pub fn edge_fit_score(record: Option<&CoOccurrence>) -> f64 {
    match record {
        None => FIT_SCORE_MISSING,
        Some(r) => match r.probability() {
            Some(p) if p > 0.0 => p.ln(),
            _ => FIT_SCORE_EMPTY,
        },
    }
}

/// Score every edge against the co-occurrence store and set `global_fit` to
/// their sum (0 for a graph without edges). Records are looked up by the
/// edge's own direction only.
pub fn fit_graph_with_data(
    store: &dyn ICoOccurrenceStore,
    graph: &mut CausalGraph,
) -> PrognosResult<f64> {
    let mut total = 0.0;
    for edge in graph.edges_mut() {
        let record = store.lookup(&edge.from, &edge.to)?;
        let score = edge_fit_score(record.as_ref());
        edge.fit_score = Some(score);
        total += score;
    }
    graph.global_fit = total;
    Ok(total)
}
