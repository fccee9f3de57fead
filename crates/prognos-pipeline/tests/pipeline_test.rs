use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use prognos_core::config::PrognosConfig;
use prognos_core::models::{ClinicianAction, ClinicianEdit, DiseaseCode};
use prognos_core::traits::{IPredictionStore, ITextGenerator};
use prognos_core::PrognosError;
use prognos_pipeline::{Collaborators, PredictionPipeline};
use prognos_retrieval::SummarySource;
use prognos_storage::StorageEngine;
use test_fixtures::{
    load_fixture, ClinicalScenario, InMemoryPredictionStore, KeywordEmbedder, SlowGenerator,
    TrackingGenerator,
};

const PATIENT: i64 = 1;
const LAST_VISIT: i64 = 102;

struct Harness {
    pipeline: PredictionPipeline,
    store: Arc<InMemoryPredictionStore>,
    embedder: Arc<KeywordEmbedder>,
}

fn harness_with(generator: Option<Arc<dyn ITextGenerator>>, config: PrognosConfig) -> Harness {
    let scenario: ClinicalScenario = load_fixture("scenarios/ckd_progression.json");
    let embedder = Arc::new(KeywordEmbedder::default());
    let store = Arc::new(InMemoryPredictionStore::default());
    let collaborators = Collaborators {
        history: Arc::new(scenario.history_store()),
        transitions: Arc::new(scenario.transition_store()),
        co_occurrence: Arc::new(scenario.co_occurrence_store()),
        documents: Arc::new(scenario.document_store(embedder.as_ref())),
        predictions: store.clone(),
        embedder: embedder.clone(),
        generator,
    };
    Harness {
        pipeline: PredictionPipeline::new(collaborators, config),
        store,
        embedder,
    }
}

fn harness() -> Harness {
    harness_with(None, PrognosConfig::default())
}

fn codes(p: &prognos_core::models::Prediction) -> Vec<String> {
    p.predictions.iter().map(|c| c.code.to_string()).collect()
}

// ===== Predict =====

#[test]
fn predict_ranks_candidates_and_persists() {
    let h = harness();
    let outcome = h.pipeline.predict(PATIENT, None).unwrap();

    assert!(outcome.prediction_id > 0);
    assert_eq!(outcome.summary_source, SummarySource::Fresh);
    let p = &outcome.prediction;
    assert!(p.fallback, "no generator configured");
    assert_eq!(codes(p)[0], "N18.4");
    assert_eq!(p.predictions.len(), 4);
    assert!(p
        .predictions
        .windows(2)
        .all(|w| w[0].score >= w[1].score));
    assert!(p.explanation.contains("N18.4 is the most likely progression"));
    assert_eq!(p.dag.edge_count(), 3);

    assert_eq!(h.store.predictions_for(PATIENT).len(), 1);
    let stored = h.store.load_graph(PATIENT).unwrap().unwrap();
    assert_eq!(stored.edge_count(), 3);
    assert!(h.pipeline.summary_cache().get(PATIENT, LAST_VISIT).is_some());
}

#[test]
fn unknown_patient_is_not_found() {
    let h = harness();
    let err = h.pipeline.predict(999, None).unwrap_err();
    assert!(matches!(err, PrognosError::PatientNotFound { patient_id: 999 }));
    assert!(h.store.predictions_for(999).is_empty());
}

#[test]
fn second_predict_reuses_cached_summaries() {
    let h = harness();
    let first = h.pipeline.predict(PATIENT, None).unwrap();
    let calls = h.embedder.calls();

    let second = h.pipeline.predict(PATIENT, None).unwrap();
    assert_eq!(second.summary_source, SummarySource::Memory);
    assert_eq!(h.embedder.calls(), calls, "no embedding on a cache hit");
    assert_eq!(codes(&first.prediction), codes(&second.prediction));
    assert_eq!(h.store.predictions_for(PATIENT).len(), 2);
}

#[test]
fn clinician_comment_forces_fresh_context() {
    let h = harness();
    h.pipeline.predict(PATIENT, None).unwrap();

    let outcome = h
        .pipeline
        .predict(PATIENT, Some("kidney function declining fast"))
        .unwrap();
    assert_eq!(outcome.summary_source, SummarySource::Fresh);
    let p = &outcome.prediction;
    assert!(p.predictions.iter().all(|c| c.clinician_boost == 0.2));
    assert!(p
        .explanation
        .contains("Clinician input considered: kidney function declining fast"));
}

#[test]
fn blank_comment_is_ignored() {
    let h = harness();
    h.pipeline.predict(PATIENT, None).unwrap();
    let outcome = h.pipeline.predict(PATIENT, Some("   ")).unwrap();
    assert_eq!(outcome.summary_source, SummarySource::Memory);
}

#[test]
fn slow_generator_falls_back_within_deadline() {
    let mut config = PrognosConfig::default();
    config.ranking.generation_timeout_ms = 50;
    let slow: Arc<dyn ITextGenerator> = Arc::new(SlowGenerator::new(
        Duration::from_secs(2),
        r#"{"predictions": [], "explanation": "late"}"#,
    ));
    let h = harness_with(Some(slow), config);

    let started = Instant::now();
    let outcome = h.pipeline.predict(PATIENT, None).unwrap();
    assert!(started.elapsed() < Duration::from_millis(1_500));
    assert!(outcome.prediction.fallback);
    assert_eq!(codes(&outcome.prediction)[0], "N18.4");
}

#[test]
fn failed_commit_persists_nothing() {
    let h = harness();
    h.store.fail_commits(true);

    let err = h.pipeline.predict(PATIENT, None).unwrap_err();
    assert!(matches!(err, PrognosError::StorageError(_)));
    assert!(h.store.predictions_for(PATIENT).is_empty());
    assert!(h.store.load_graph(PATIENT).unwrap().is_none());
    assert!(h.pipeline.summary_cache().get(PATIENT, LAST_VISIT).is_none());

    h.store.fail_commits(false);
    let outcome = h.pipeline.predict(PATIENT, None).unwrap();
    assert_eq!(outcome.summary_source, SummarySource::Fresh);
}

fn tracked_harness() -> (Harness, Arc<TrackingGenerator>) {
    let generator = Arc::new(TrackingGenerator::new(Duration::from_millis(100), "not json"));
    let shared: Arc<dyn ITextGenerator> = generator.clone();
    let h = harness_with(Some(shared), PrognosConfig::default());
    (h, generator)
}

#[test]
fn concurrent_predicts_for_one_patient_never_overlap() {
    let (h, generator) = tracked_harness();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| h.pipeline.predict(PATIENT, None).unwrap());
        }
    });
    assert_eq!(generator.calls(), 4);
    assert_eq!(generator.max_in_flight(), 1, "same patient runs one request at a time");

    let stored = h.store.predictions_for(PATIENT);
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().all(|p| p.fallback));
    assert!(stored.iter().all(|p| p.top_code() == Some(&DiseaseCode::new("N18.4"))));
}

#[test]
fn concurrent_refines_keep_every_edge() {
    let (h, generator) = tracked_harness();
    std::thread::scope(|s| {
        for i in 0..4 {
            let h = &h;
            s.spawn(move || {
                let edit = ClinicianEdit::new(
                    ClinicianAction::AddEdge,
                    "N18.4",
                    format!("Z{i}").as_str(),
                    "clinician hypothesis",
                );
                h.pipeline.refine(PATIENT, &edit).unwrap()
            });
        }
    });
    assert_eq!(generator.max_in_flight(), 1);

    let graph = h.pipeline.graph(PATIENT).unwrap();
    let mut targets: Vec<String> = graph.edges().iter().map(|e| e.to.to_string()).collect();
    targets.sort();
    assert_eq!(targets, vec!["Z0", "Z1", "Z2", "Z3"], "no update is lost");
    assert_eq!(h.store.predictions_for(PATIENT).len(), 4);
}

// ===== Refine =====

#[test]
fn refine_add_edge_ranks_edge_targets() {
    let h = harness();
    h.pipeline.predict(PATIENT, None).unwrap();

    let edit = ClinicianEdit::new(ClinicianAction::AddEdge, "N18.4", "N18.5", "eGFR below 20");
    let outcome = h.pipeline.refine(PATIENT, &edit).unwrap();
    assert_eq!(outcome.summary_source, SummarySource::Fresh);

    let p = &outcome.prediction;
    assert_eq!(p.dag.edge_count(), 4);
    let added = p.dag.edges().last().unwrap();
    assert!(added.clinician_added);
    assert_eq!(added.reason.as_deref(), Some("eGFR below 20"));

    let n185 = p
        .predictions
        .iter()
        .find(|c| c.code.as_str() == "N18.5")
        .unwrap();
    assert_eq!(n185.transition_score, 0.8);
    assert!(p.explanation.contains("Clinician input considered: eGFR below 20"));

    assert_eq!(h.pipeline.graph(PATIENT).unwrap().edge_count(), 4);
    assert_eq!(h.store.predictions_for(PATIENT).len(), 2);
}

#[test]
fn refine_reverse_flags_the_edge() {
    let h = harness();
    h.pipeline.predict(PATIENT, None).unwrap();

    let edit = ClinicianEdit::new(ClinicianAction::ReverseEdge, "N18.3", "N18.4", "other way round");
    h.pipeline.refine(PATIENT, &edit).unwrap();

    let graph = h.pipeline.graph(PATIENT).unwrap();
    let reversed = graph
        .edges()
        .iter()
        .find(|e| e.from.as_str() == "N18.4" && e.to.as_str() == "N18.3")
        .unwrap();
    assert!(reversed.clinician_reversed);
    assert!(!graph
        .edges()
        .iter()
        .any(|e| e.from.as_str() == "N18.3" && e.to.as_str() == "N18.4"));
}

#[test]
fn refine_without_stored_graph_ranks_edit_endpoints() {
    let h = harness();
    let edit = ClinicianEdit::new(ClinicianAction::RemoveEdge, "I10", "N18.3", "not causal");
    let outcome = h.pipeline.refine(PATIENT, &edit).unwrap();

    let p = &outcome.prediction;
    assert!(p.dag.edges().is_empty());
    assert_eq!(p.predictions.len(), 2);
    assert!(p.predictions.iter().all(|c| c.transition_score == 0.5));
}

#[test]
fn refine_unknown_patient_is_not_found() {
    let h = harness();
    let edit = ClinicianEdit::new(ClinicianAction::AddEdge, "A", "B", "r");
    let err = h.pipeline.refine(42, &edit).unwrap_err();
    assert!(matches!(err, PrognosError::PatientNotFound { patient_id: 42 }));
}

#[test]
fn invalid_edit_commits_nothing() {
    let h = harness();
    let edit = ClinicianEdit::new(ClinicianAction::AddEdge, " ", "N18.5", "r");
    let err = h.pipeline.refine(PATIENT, &edit).unwrap_err();
    assert!(matches!(err, PrognosError::InvalidEdit { .. }));
    assert!(h.store.predictions_for(PATIENT).is_empty());
}

// ===== SQLite end to end =====

fn seeded_storage() -> StorageEngine {
    let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.insert_patient(7, Some("Grace")).unwrap();
    engine.insert_visit(70, 7, date(1, 5)).unwrap();
    engine.insert_diagnosis(70, "E11.9", None).unwrap();
    engine.insert_visit(71, 7, date(4, 9)).unwrap();
    engine.insert_diagnosis(71, "I10", None).unwrap();
    engine.upsert_transition("I10", "N18.3", 0.3, 40).unwrap();
    engine.upsert_transition("I10", "I50.9", 0.25, 30).unwrap();
    engine.upsert_transition("N18.3", "I50.9", 0.2, 10).unwrap();
    engine.upsert_co_occurrence("N18.3", "I50.9", 4, 20).unwrap();
    engine
}

#[test]
fn sqlite_backed_pipeline_round_trip() {
    let storage = Arc::new(seeded_storage());
    let collaborators = Collaborators::from_storage(
        storage.clone(),
        Arc::new(KeywordEmbedder::default()),
        None,
    );
    let pipeline = PredictionPipeline::new(collaborators.clone(), PrognosConfig::default());

    let chunks = pipeline
        .ingest_document(
            &DiseaseCode::new("N18.3"),
            "Hypertension is a leading risk factor for chronic kidney disease progression.",
        )
        .unwrap();
    assert_eq!(chunks.len(), 1);

    let outcome = pipeline.predict(7, None).unwrap();
    assert_eq!(outcome.summary_source, SummarySource::Fresh);
    assert_eq!(codes(&outcome.prediction), vec!["N18.3", "I50.9"]);
    assert_eq!(storage.count_predictions(7).unwrap(), 1);
    let latest = storage.latest_prediction(7).unwrap().unwrap();
    assert_eq!(latest.top_code(), Some(&DiseaseCode::new("N18.3")));
    assert_eq!(pipeline.graph(7).unwrap().edge_count(), 1);

    // A new process has an empty memory cache but finds the durable one.
    let restarted = PredictionPipeline::new(collaborators, PrognosConfig::default());
    let again = restarted.predict(7, None).unwrap();
    assert_eq!(again.summary_source, SummarySource::Durable);
    assert_eq!(storage.count_predictions(7).unwrap(), 2);
}
