//! Initial graph from pairwise transition probabilities.

use tracing::debug;

use prognos_core::errors::PrognosResult;
use prognos_core::models::{CausalEdge, CausalGraph, DiseaseCode};
use prognos_core::traits::ITransitionStore;

/// One node per distinct entity and an edge for every ordered pair of
/// distinct entities whose transition probability is strictly positive.
/// Self-loops are never produced.
pub fn generate_initial_dag(
    store: &dyn ITransitionStore,
    entities: &[DiseaseCode],
) -> PrognosResult<CausalGraph> {
    let mut graph = CausalGraph::new();
    for code in entities {
        graph.ensure_node(code);
    }

    let nodes: Vec<DiseaseCode> = graph.node_codes().cloned().collect();
    for from in &nodes {
        for to in &nodes {
            if from == to {
                continue;
            }
            if let Some(p) = store.probability(from, to)? {
                if p > 0.0 {
                    graph.push_edge(CausalEdge::new(from.clone(), to.clone(), p));
                }
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "generated initial graph"
    );
    Ok(graph)
}
