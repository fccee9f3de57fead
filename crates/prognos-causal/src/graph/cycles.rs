//! Cycle detection using Tarjan's SCC.
//! Cycles are permitted in a patient graph; they are only reported.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use prognos_core::models::{CausalGraph, DiseaseCode};

/// Strongly connected components with more than one node, as disease codes.
pub fn cycle_report(graph: &CausalGraph) -> Vec<Vec<DiseaseCode>> {
    let mut pg: DiGraph<&DiseaseCode, ()> = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    for code in graph.node_codes() {
        pg.add_node(code);
    }
    for edge in graph.edges() {
        // Node arena and petgraph indices are both insertion ordered.
        if let (Some(a), Some(b)) = (graph.node_id(&edge.from), graph.node_id(&edge.to)) {
            pg.add_edge(NodeIndex::new(a.index()), NodeIndex::new(b.index()), ());
        }
    }

    tarjan_scc(&pg)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| scc.into_iter().map(|idx| pg[idx].clone()).collect())
        .collect()
}
