//! Property tests for prognos-ranking: fallback ordering and parse safety.

use proptest::prelude::*;

use prognos_core::config::RankingConfig;
use prognos_core::models::{CausalGraph, DiseaseCode, DocumentSummary};
use prognos_ranking::{deterministic_fallback, parse_model_output};

fn summaries(sims: &[(usize, f64)]) -> Vec<DocumentSummary> {
    sims.iter()
        .enumerate()
        .map(|(i, &(code, similarity))| DocumentSummary {
            doc_id: i as i64,
            disease_code: format!("C{code}").into(),
            section: "overview".into(),
            summary: "text".into(),
            similarity,
            content: String::new(),
        })
        .collect()
}

proptest! {
    #[test]
    fn fallback_is_sorted_dense_and_bounded(
        probs in prop::collection::vec(0.0_f64..1.0, 1..20),
        sims in prop::collection::vec((0..20usize, 0.0_f64..1.0), 0..10),
        comment in prop::option::of("[a-z ]{0,30}"),
    ) {
        let candidates: Vec<(DiseaseCode, f64)> = probs
            .iter()
            .enumerate()
            .map(|(i, p)| (DiseaseCode::new(format!("C{i}")), *p))
            .collect();
        let config = RankingConfig::default();
        let p = deterministic_fallback(
            &candidates,
            &CausalGraph::new(),
            &summaries(&sims),
            comment.as_deref(),
            &config,
        );

        prop_assert!(p.fallback);
        prop_assert_eq!(p.predictions.len(), candidates.len().min(config.top_n));
        for (i, c) in p.predictions.iter().enumerate() {
            prop_assert_eq!(c.rank, i + 1);
            prop_assert!(c.score >= 0.0 && c.score <= 1.0);
        }
        for pair in p.predictions.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert!(p.explanation.chars().count() <= config.explanation_max_chars);
    }

    #[test]
    fn parse_never_panics(raw in ".{0,200}") {
        let _ = parse_model_output(&raw);
    }

    #[test]
    fn text_without_braces_is_never_parsed(raw in "[^{}]{0,200}") {
        prop_assert!(parse_model_output(&raw).is_none());
    }
}
