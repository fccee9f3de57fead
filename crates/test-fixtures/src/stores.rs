//! In-memory implementations of every collaborator store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use prognos_core::errors::{PrognosResult, StorageError};
use prognos_core::models::{
    CausalGraph, CoOccurrence, DiseaseCode, DocumentSummary, PatientHistory, Prediction,
    PredictionCommit, StoredDocument, TransitionEdge,
};
use prognos_core::traits::{
    ICoOccurrenceStore, IDocumentStore, IEmbeddingProvider, IPatientHistory, IPredictionStore,
    ITransitionStore,
};

/// Transition statistics held in a vector, queried in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTransitions {
    edges: Vec<TransitionEdge>,
}

impl InMemoryTransitions {
    pub fn from_edges(edges: Vec<TransitionEdge>) -> Self {
        Self { edges }
    }

    pub fn with(mut self, from: &str, to: &str, probability: f64) -> Self {
        self.edges.push(TransitionEdge {
            from: from.into(),
            to: to.into(),
            probability,
            support_count: 1,
        });
        self
    }
}

impl ITransitionStore for InMemoryTransitions {
    fn outgoing(&self, from: &DiseaseCode) -> PrognosResult<Vec<TransitionEdge>> {
        Ok(self.edges.iter().filter(|e| &e.from == from).cloned().collect())
    }

    fn probability(&self, from: &DiseaseCode, to: &DiseaseCode) -> PrognosResult<Option<f64>> {
        Ok(self
            .edges
            .iter()
            .find(|e| &e.from == from && &e.to == to)
            .map(|e| e.probability))
    }
}

/// Co-occurrence records keyed by exact ordered pair.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCoOccurrence {
    records: HashMap<(DiseaseCode, DiseaseCode), CoOccurrence>,
}

impl InMemoryCoOccurrence {
    pub fn from_records(records: Vec<CoOccurrence>) -> Self {
        let mut store = Self::default();
        for r in records {
            store
                .records
                .insert((r.disease_a.clone(), r.disease_b.clone()), r);
        }
        store
    }

    pub fn with(mut self, a: &str, b: &str, count: u64, total_population: u64) -> Self {
        self.records.insert(
            (a.into(), b.into()),
            CoOccurrence {
                disease_a: a.into(),
                disease_b: b.into(),
                count,
                total_population,
            },
        );
        self
    }
}

impl ICoOccurrenceStore for InMemoryCoOccurrence {
    fn lookup(&self, a: &DiseaseCode, b: &DiseaseCode) -> PrognosResult<Option<CoOccurrence>> {
        Ok(self.records.get(&(a.clone(), b.clone())).cloned())
    }
}

/// A document corpus with a read counter.
#[derive(Debug, Default)]
pub struct InMemoryDocuments {
    docs: RwLock<Vec<StoredDocument>>,
    reads: AtomicUsize,
}

impl InMemoryDocuments {
    /// Embed and add a document. Returns its id.
    pub fn add(
        &self,
        embedder: &dyn IEmbeddingProvider,
        disease_code: &str,
        section: &str,
        content: &str,
    ) -> i64 {
        let embedding = embedder.embed(content).expect("fixture embedding");
        self.insert(&disease_code.into(), section, content, &embedding)
            .expect("fixture insert")
    }

    /// Number of `list_all` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.docs.read().expect("docs lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IDocumentStore for InMemoryDocuments {
    fn list_all(&self) -> PrognosResult<Vec<StoredDocument>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.docs.read().expect("docs lock").clone())
    }

    fn insert(
        &self,
        disease_code: &DiseaseCode,
        section: &str,
        content: &str,
        embedding: &[f32],
    ) -> PrognosResult<i64> {
        let mut docs = self.docs.write().expect("docs lock");
        let doc_id = docs.len() as i64 + 1;
        docs.push(StoredDocument {
            doc_id,
            disease_code: disease_code.clone(),
            section: section.to_string(),
            content: content.to_string(),
            embedding: embedding.to_vec(),
        });
        Ok(doc_id)
    }
}

/// Patient histories by id. Unknown patients have an empty history.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    histories: HashMap<i64, PatientHistory>,
}

impl InMemoryHistory {
    pub fn with_history(mut self, history: PatientHistory) -> Self {
        self.histories.insert(history.patient_id, history);
        self
    }
}

impl IPatientHistory for InMemoryHistory {
    fn history(&self, patient_id: i64) -> PrognosResult<PatientHistory> {
        Ok(self
            .histories
            .get(&patient_id)
            .cloned()
            .unwrap_or_else(|| PatientHistory::new(patient_id, Vec::new())))
    }
}

#[derive(Debug, Default)]
struct PredictionState {
    graphs: HashMap<i64, CausalGraph>,
    summaries: HashMap<(i64, i64), Vec<DocumentSummary>>,
    predictions: Vec<(i64, Prediction)>,
}

/// Durable-store stand-in. Commits apply all-or-nothing and can be made to fail.
#[derive(Debug, Default)]
pub struct InMemoryPredictionStore {
    state: Mutex<PredictionState>,
    fail_commits: AtomicBool,
    summary_reads: AtomicUsize,
}

impl InMemoryPredictionStore {
    /// Make every following commit fail without writing anything.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    pub fn put_graph(&self, patient_id: i64, graph: CausalGraph) {
        self.state
            .lock()
            .expect("state lock")
            .graphs
            .insert(patient_id, graph);
    }

    pub fn put_summaries(&self, patient_id: i64, visit_id: i64, summaries: Vec<DocumentSummary>) {
        self.state
            .lock()
            .expect("state lock")
            .summaries
            .insert((patient_id, visit_id), summaries);
    }

    pub fn predictions_for(&self, patient_id: i64) -> Vec<Prediction> {
        self.state
            .lock()
            .expect("state lock")
            .predictions
            .iter()
            .filter(|(pid, _)| *pid == patient_id)
            .map(|(_, p)| p.clone())
            .collect()
    }

    /// Number of `cached_summaries` calls so far.
    pub fn summary_reads(&self) -> usize {
        self.summary_reads.load(Ordering::SeqCst)
    }
}

impl IPredictionStore for InMemoryPredictionStore {
    fn load_graph(&self, patient_id: i64) -> PrognosResult<Option<CausalGraph>> {
        Ok(self
            .state
            .lock()
            .expect("state lock")
            .graphs
            .get(&patient_id)
            .cloned())
    }

    fn cached_summaries(&self, patient_id: i64, visit_id: i64) -> PrognosResult<Vec<DocumentSummary>> {
        self.summary_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .lock()
            .expect("state lock")
            .summaries
            .get(&(patient_id, visit_id))
            .cloned()
            .unwrap_or_default())
    }

    fn commit(&self, commit: &PredictionCommit) -> PrognosResult<i64> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StorageError::TransactionFailed {
                reason: "injected failure".to_string(),
            }
            .into());
        }
        let mut state = self.state.lock().expect("state lock");
        state
            .graphs
            .insert(commit.patient_id, commit.prediction.dag.clone());
        if let Some(visit_id) = commit.visit_id {
            if !commit.summaries_to_cache.is_empty() {
                state
                    .summaries
                    .entry((commit.patient_id, visit_id))
                    .or_insert_with(|| commit.summaries_to_cache.clone());
            }
        }
        state
            .predictions
            .push((commit.patient_id, commit.prediction.clone()));
        Ok(state.predictions.len() as i64)
    }
}
