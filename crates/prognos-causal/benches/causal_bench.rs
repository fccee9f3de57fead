use criterion::{criterion_group, criterion_main, Criterion};

use prognos_causal::CausalGraphEngine;
use prognos_core::models::{DiseaseCode, DocumentSummary};
use test_fixtures::{InMemoryCoOccurrence, InMemoryTransitions};

const CODES: usize = 200;

/// ~1K transitions: each code reaches its five successors.
fn population() -> (InMemoryTransitions, InMemoryCoOccurrence) {
    let mut transitions = InMemoryTransitions::default();
    let mut co = InMemoryCoOccurrence::default();
    for i in 0..CODES {
        for j in 1..=5 {
            let target = (i + j) % CODES;
            let (a, b) = (format!("C{i}"), format!("C{target}"));
            transitions = transitions.with(&a, &b, 0.1 * j as f64);
            co = co.with(&a, &b, j as u64, 50);
        }
    }
    (transitions, co)
}

fn evidence() -> Vec<DocumentSummary> {
    (0..CODES)
        .step_by(3)
        .map(|i| DocumentSummary {
            doc_id: i as i64,
            disease_code: format!("C{i}").into(),
            section: "overview".into(),
            summary: String::new(),
            similarity: 0.5,
            content: "Progression to the next stage is common; it is associated with age.".into(),
        })
        .collect()
}

fn bench_candidate_set(c: &mut Criterion) {
    let (t, co) = population();
    let engine = CausalGraphEngine::new(&t, &co);
    let current: Vec<DiseaseCode> = (0..10).map(|i| format!("C{i}").into()).collect();

    c.bench_function("candidate_set_10_current", |b| {
        b.iter(|| engine.build_candidate_set(&current).unwrap());
    });
}

fn bench_initial_fit_refine(c: &mut Criterion) {
    let (t, co) = population();
    let engine = CausalGraphEngine::new(&t, &co);
    let entities: Vec<DiseaseCode> = (0..30).map(|i| format!("C{i}").into()).collect();
    let docs = evidence();

    c.bench_function("initial_fit_refine_30_nodes", |b| {
        b.iter(|| {
            let graph = engine.generate_initial_dag(&entities).unwrap();
            let graph = engine.fit_graph_with_data(graph).unwrap();
            engine.iterative_refine(graph, &docs).unwrap()
        });
    });
}

fn bench_cycle_report(c: &mut Criterion) {
    let (t, co) = population();
    let engine = CausalGraphEngine::new(&t, &co);
    let entities: Vec<DiseaseCode> = (0..CODES).map(|i| format!("C{i}").into()).collect();
    let graph = engine.generate_initial_dag(&entities).unwrap();

    c.bench_function("cycle_report_200_nodes", |b| {
        b.iter(|| engine.cycle_report(&graph));
    });
}

criterion_group!(
    benches,
    bench_candidate_set,
    bench_initial_fit_refine,
    bench_cycle_report
);
criterion_main!(benches);
