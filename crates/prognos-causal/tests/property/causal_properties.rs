//! Property tests for prognos-causal: candidate sets, refinement bounds,
//! and clinician edit reversibility.

use proptest::prelude::*;

use prognos_causal::{apply_edit, build_candidate_set, iterative_refine};
use prognos_core::models::{
    CausalEdge, CausalGraph, ClinicianAction, ClinicianEdit, DiseaseCode, DocumentSummary,
};
use test_fixtures::{InMemoryCoOccurrence, InMemoryTransitions};

fn code(i: usize) -> String {
    format!("C{i}")
}

fn transitions(edges: &[(usize, usize, f64)]) -> InMemoryTransitions {
    edges
        .iter()
        .fold(InMemoryTransitions::default(), |store, &(a, b, p)| {
            store.with(&code(a), &code(b), p)
        })
}

fn graph_from(edges: &[(usize, usize, f64)]) -> CausalGraph {
    let mut graph = CausalGraph::new();
    for &(a, b, w) in edges {
        if a != b {
            graph.push_edge(CausalEdge::new(code(a).into(), code(b).into(), w));
        }
    }
    graph
}

fn evidence(codes: &[usize]) -> Vec<DocumentSummary> {
    codes
        .iter()
        .map(|&i| DocumentSummary {
            doc_id: i as i64,
            disease_code: code(i).into(),
            section: "overview".into(),
            summary: String::new(),
            similarity: 0.5,
            content: "Untreated, this leads to organ damage.".into(),
        })
        .collect()
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..n, 0..n, 0.0_f64..1.0_f64), 0..n * 3)
}

// =============================================================================
// Candidate sets: unique, above epsilon, non-increasing
// =============================================================================
proptest! {
    #[test]
    fn candidate_sets_are_unique_filtered_and_sorted(
        edges in edge_strategy(12),
        current in prop::collection::vec(0..12usize, 0..5),
        epsilon in 0.0_f64..0.5,
    ) {
        let store = transitions(&edges);
        let current: Vec<DiseaseCode> = current.into_iter().map(|i| code(i).into()).collect();
        let set = build_candidate_set(&store, &current, epsilon).unwrap();

        let scored = set.scored();
        let mut seen = std::collections::HashSet::new();
        for (c, p) in &scored {
            prop_assert!(seen.insert(c.clone()), "duplicate candidate {}", c);
            prop_assert!(*p > epsilon);
        }
        for pair in scored.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }
}

// =============================================================================
// Refinement: weights never decrease and never exceed 1.0
// =============================================================================
proptest! {
    #[test]
    fn refinement_is_monotone_and_bounded(
        edges in edge_strategy(8),
        documented in prop::collection::vec(0..8usize, 0..6),
        max_iterations in 0usize..5,
    ) {
        let mut graph = graph_from(&edges);
        let before: Vec<f64> = graph.edges().iter().map(|e| e.weight).collect();

        iterative_refine(
            &InMemoryCoOccurrence::default(),
            &mut graph,
            &evidence(&documented),
            max_iterations,
            1.2,
        )
        .unwrap();

        for (old, edge) in before.iter().zip(graph.edges()) {
            prop_assert!(edge.weight >= *old);
            prop_assert!(edge.weight <= 1.0);
        }
        for record in &graph.modification_history {
            prop_assert!(record.new_weight >= record.old_weight);
            prop_assert!(record.iteration < max_iterations);
        }
    }
}

// =============================================================================
// Clinician edits: add then remove of a new pair restores the edge list
// =============================================================================
proptest! {
    #[test]
    fn add_then_remove_restores_edges(
        edges in edge_strategy(8),
        from in 0..8usize,
        to in 0..8usize,
    ) {
        let mut graph = graph_from(&edges);
        let (from, to) = (code(from), code(to));
        let pair = (DiseaseCode::new(from.as_str()), DiseaseCode::new(to.as_str()));
        prop_assume!(!graph.edges().iter().any(|e| e.connects(&pair.0, &pair.1)));

        let before: Vec<String> = graph.edges().iter().map(|e| e.label()).collect();
        let store = InMemoryCoOccurrence::default();
        let add = ClinicianEdit::new(ClinicianAction::AddEdge, from.as_str(), to.as_str(), "r");
        let remove = ClinicianEdit::new(ClinicianAction::RemoveEdge, from.as_str(), to.as_str(), "r");
        apply_edit(&store, &mut graph, &add, 0.8).unwrap();
        apply_edit(&store, &mut graph, &remove, 0.8).unwrap();

        let after: Vec<String> = graph.edges().iter().map(|e| e.label()).collect();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn reversing_a_missing_pair_changes_nothing(
        edges in edge_strategy(8),
        from in 0..8usize,
        to in 0..8usize,
    ) {
        let mut graph = graph_from(&edges);
        let pair = (DiseaseCode::new(code(from)), DiseaseCode::new(code(to)));
        prop_assume!(!graph.edges().iter().any(|e| e.connects(&pair.0, &pair.1)));

        let before: Vec<(String, f64)> = graph.edges().iter().map(|e| (e.label(), e.weight)).collect();
        let reverse = ClinicianEdit::new(ClinicianAction::ReverseEdge, pair.0.clone(), pair.1.clone(), "r");
        apply_edit(&InMemoryCoOccurrence::default(), &mut graph, &reverse, 0.8).unwrap();

        let after: Vec<(String, f64)> = graph.edges().iter().map(|e| (e.label(), e.weight)).collect();
        prop_assert_eq!(after, before);
    }
}
