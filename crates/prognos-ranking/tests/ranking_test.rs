use std::sync::Arc;
use std::time::{Duration, Instant};

use prognos_core::config::RankingConfig;
use prognos_core::models::{CausalEdge, CausalGraph, DiseaseCode, DocumentSummary};
use prognos_ranking::RankingEngine;
use test_fixtures::{ScriptedGenerator, SlowGenerator};

fn candidates() -> Vec<(DiseaseCode, f64)> {
    vec![
        (DiseaseCode::new("N18.4"), 0.7),
        (DiseaseCode::new("N18.3"), 0.3),
        (DiseaseCode::new("I50.9"), 0.25),
    ]
}

fn graph() -> CausalGraph {
    let mut g = CausalGraph::new();
    g.push_edge(CausalEdge::new("N18.3".into(), "N18.4".into(), 0.84));
    g
}

fn summaries() -> Vec<DocumentSummary> {
    vec![
        DocumentSummary {
            doc_id: 1,
            disease_code: "N18.4".into(),
            section: "overview".into(),
            summary: "Chronic kidney disease stage 4 is a severe reduction in kidney function.".into(),
            similarity: 0.62,
            content: String::new(),
        },
        DocumentSummary {
            doc_id: 2,
            disease_code: "I50.9".into(),
            section: "overview".into(),
            summary: "Heart failure describes a heart that cannot pump enough blood.".into(),
            similarity: 0.41,
            content: String::new(),
        },
    ]
}

fn engine_with(generator: Arc<dyn prognos_core::traits::ITextGenerator>, timeout_ms: u64) -> RankingEngine {
    RankingEngine::new(
        Some(generator),
        RankingConfig {
            generation_timeout_ms: timeout_ms,
            ..RankingConfig::default()
        },
    )
}

// ===== Model path =====

#[test]
fn well_formed_model_output_is_used() {
    let generator = Arc::new(ScriptedGenerator::new(
        r#"{"predictions": [{"code": "N18.4", "score": 0.81, "rank": 1}, {"code": "I50.9", "score": 0.2}],
            "explanation": "Stage 3 CKD with hypertension usually progresses.",
            "evidence": [{"disease_code": "N18.4", "snippet": "severe reduction"}]}"#,
    ));
    let engine = engine_with(generator.clone(), 5_000);

    let p = engine.rank_and_explain(
        "Patient with history of E11.9, I10, N18.3",
        &candidates(),
        &graph(),
        &summaries(),
        Some("eGFR falling"),
    );

    assert!(!p.fallback);
    assert_eq!(p.predictions.len(), 2);
    assert_eq!(p.predictions[1].rank, 2);
    assert_eq!(p.explanation, "Stage 3 CKD with hypertension usually progresses.");
    assert_eq!(p.evidence.len(), 1);
    assert_eq!(p.dag.edge_count(), 1, "current graph is attached");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Candidate diseases: N18.4 (0.70), N18.3 (0.30), I50.9 (0.25)"));
    assert!(prompts[0].contains("Clinician note: eGFR falling"));
}

#[test]
fn json_wrapped_in_prose_is_recovered() {
    let generator = Arc::new(ScriptedGenerator::new(
        "Here is my answer:\n{'predictions': [{'code': 'N18.4'}], 'explanation': 'likely',}\nThanks.",
    ));
    let engine = engine_with(generator, 5_000);
    let p = engine.rank_and_explain("p", &candidates(), &graph(), &summaries(), None);
    assert!(!p.fallback);
    assert_eq!(p.predictions[0].code.as_str(), "N18.4");
    assert_eq!(p.predictions[0].rank, 1);
}

// ===== Fallback path =====

#[test]
fn unparseable_output_falls_back() {
    let generator = Arc::new(ScriptedGenerator::new("N18.4 seems most likely."));
    let engine = engine_with(generator, 5_000);
    let p = engine.rank_and_explain("p", &candidates(), &graph(), &summaries(), None);

    assert!(p.fallback);
    let codes: Vec<&str> = p.predictions.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["N18.4", "I50.9", "N18.3"]);
    // 0.6 * 0.7 + 0.3 * 0.62
    assert!((p.predictions[0].score - 0.606).abs() < 1e-9);
    assert_eq!(p.predictions[0].dag_score, 0.84);
    assert!(p
        .explanation
        .starts_with("Based on transition probability (0.70) and document evidence (0.62), N18.4"));
}

#[test]
fn slow_generator_times_out_into_fallback() {
    let generator = Arc::new(SlowGenerator::new(
        Duration::from_secs(2),
        r#"{"predictions": [], "explanation": "too late"}"#,
    ));
    let engine = engine_with(generator, 50);

    let started = Instant::now();
    let p = engine.rank_and_explain("p", &candidates(), &graph(), &summaries(), None);

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(p.fallback);
    assert_ne!(p.explanation, "too late");
}

#[test]
fn missing_required_key_falls_back() {
    let generator = Arc::new(ScriptedGenerator::new(r#"{"predictions": []}"#));
    let engine = engine_with(generator, 5_000);
    let p = engine.rank_and_explain("p", &candidates(), &graph(), &summaries(), None);
    assert!(p.fallback);
    assert_eq!(p.predictions.len(), 3);
}
