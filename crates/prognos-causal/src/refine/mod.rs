//! Evidence-driven refinement: edges whose endpoints are described by a
//! document containing a causal phrase get their weight boosted.

pub mod lexicon;

use tracing::debug;

use prognos_core::errors::PrognosResult;
use prognos_core::models::{CausalGraph, DocumentSummary, ModificationRecord};
use prognos_core::traits::ICoOccurrenceStore;

use crate::fit::fit_graph_with_data;
use lexicon::find_causal_phrase;

/// A summary that can boost edges: its lower-cased disease code and the
/// phrase that matched.
struct Evidence {
    code: String,
    phrase: &'static str,
}

fn collect_evidence(summaries: &[DocumentSummary]) -> Vec<Evidence> {
    summaries
        .iter()
        .filter_map(|s| {
            find_causal_phrase(s.evidence_text()).map(|phrase| Evidence {
                code: s.disease_code.as_str().to_lowercase(),
                phrase,
            })
        })
        .collect()
}

/// Run up to `max_iterations` boosting passes over `graph`.
///
/// Each matching summary multiplies an edge weight by `boost_factor`, capped
/// at 1.0, and leaves a record even when the cap holds the weight in place.
/// A pass without any match ends refinement; after a pass with matches, the
/// fit is recomputed. The graph's modification history is replaced
/// by this run's records. Returns the number of records.
pub fn iterative_refine(
    store: &dyn ICoOccurrenceStore,
    graph: &mut CausalGraph,
    summaries: &[DocumentSummary],
    max_iterations: usize,
    boost_factor: f64,
) -> PrognosResult<usize> {
    let evidence = collect_evidence(summaries);
    let mut history: Vec<ModificationRecord> = Vec::new();

    for iteration in 0..max_iterations {
        let mut modified = false;

        for edge in graph.edges_mut() {
            let from = edge.from.as_str().to_lowercase();
            let to = edge.to.as_str().to_lowercase();
            for ev in evidence.iter().filter(|ev| ev.code == from || ev.code == to) {
                let old_weight = edge.weight;
                let new_weight = (old_weight * boost_factor).min(1.0);
                edge.weight = new_weight;
                history.push(ModificationRecord {
                    iteration,
                    edge: edge.label(),
                    phrase: ev.phrase.to_string(),
                    reason: format!(
                        "Found causal phrase '{}' in {} document",
                        ev.phrase, ev.code
                    ),
                    old_weight,
                    new_weight,
                });
                modified = true;
            }
        }

        if !modified {
            debug!(iteration, "refinement converged");
            break;
        }
        fit_graph_with_data(store, graph)?;
    }

    let records = history.len();
    graph.modification_history = history;
    debug!(
        records,
        evidence = evidence.len(),
        global_fit = graph.global_fit,
        "refined graph"
    );
    Ok(records)
}
