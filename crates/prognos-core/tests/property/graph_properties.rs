use proptest::prelude::*;

use prognos_core::models::{Candidate, CandidateSet, CausalEdge, CausalGraph, DiseaseCode};

fn code_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["E11.9", "I10", "N18.3", "N18.4", "I50.9", "E78.5"])
        .prop_map(|s| s.to_string())
}

proptest! {
    #[test]
    fn candidate_sets_are_unique_and_sorted(
        items in prop::collection::vec((code_strategy(), 0.0f64..=1.0), 0..30)
    ) {
        let set = CandidateSet::from_max_merge(items.iter().map(|(c, p)| Candidate {
            code: DiseaseCode::new(c.clone()),
            probability: *p,
            support_count: 1,
        }));

        let codes = set.codes();
        let mut deduped = codes.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), codes.len());

        let scores: Vec<f64> = set.scored().iter().map(|(_, p)| *p).collect();
        for pair in scores.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }

        // Each merged probability is the max observed for that code.
        for (code, p) in set.scored() {
            let max = items
                .iter()
                .filter(|(c, _)| c.as_str() == code.as_str())
                .map(|(_, p)| *p)
                .fold(f64::MIN, f64::max);
            prop_assert_eq!(p, max);
        }
    }

    #[test]
    fn graph_json_preserves_edges_and_weights(
        edges in prop::collection::vec(
            (code_strategy(), code_strategy(), prop::sample::select(vec![-0.5, 0.0, 0.25, 0.5, 0.8, 1.0, 1.5])),
            0..15,
        )
    ) {
        let mut graph = CausalGraph::new();
        for (from, to, w) in &edges {
            graph.push_edge(CausalEdge::new(from.as_str().into(), to.as_str().into(), *w));
        }
        for edge in graph.edges() {
            prop_assert!((0.0..=1.0).contains(&edge.weight));
        }

        let json = serde_json::to_string(&graph).unwrap();
        let restored: CausalGraph = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, graph);
    }
}
