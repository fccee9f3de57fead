//! PredictionPipeline: the two request-scoped operations and their helpers.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use prognos_causal::CausalGraphEngine;
use prognos_core::config::PrognosConfig;
use prognos_core::constants::NODE_ONLY_CANDIDATE_SCORE;
use prognos_core::errors::{PrognosError, PrognosResult};
use prognos_core::models::{
    Candidate, CandidateSet, CausalGraph, ClinicianEdit, DiseaseCode, PatientHistory, Prediction,
    PredictionCommit,
};
use prognos_ranking::{create_generator, RankingEngine};
use prognos_retrieval::{
    build_query, create_provider, IngestedChunk, KnowledgeRetriever, QueryEmbeddingCache,
    SummaryCache, SummarySource, VisitRetrieval,
};
use prognos_storage::StorageEngine;

use crate::collaborators::Collaborators;
use crate::locks::PatientLocks;

/// History codes quoted in the patient summary handed to ranking.
const PATIENT_SUMMARY_CODES: usize = 3;

/// A persisted prediction.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub prediction_id: i64,
    pub prediction: Prediction,
    /// Where the document summaries came from.
    pub summary_source: SummarySource,
}

/// Explicitly initialised orchestrator. Holds no global state.
pub struct PredictionPipeline {
    collaborators: Collaborators,
    config: PrognosConfig,
    ranking: RankingEngine,
    summary_cache: SummaryCache,
    query_cache: QueryEmbeddingCache,
    locks: PatientLocks,
}

impl PredictionPipeline {
    pub fn new(collaborators: Collaborators, config: PrognosConfig) -> Self {
        let ranking = RankingEngine::new(collaborators.generator.clone(), config.ranking.clone());
        let summary_cache = SummaryCache::from_config(&config.retrieval);
        let query_cache = QueryEmbeddingCache::new(config.embedding.query_cache_size);
        Self {
            collaborators,
            config,
            ranking,
            summary_cache,
            query_cache,
            locks: PatientLocks::new(),
        }
    }

    /// Open the configured database and providers and build a pipeline on them.
    pub fn open(config: PrognosConfig) -> PrognosResult<Self> {
        let storage = Arc::new(StorageEngine::open_with(
            Path::new(&config.storage.db_path),
            &config.storage,
        )?);
        let embedder = create_provider(&config.embedding);
        let generator = create_generator(&config.generation);
        let generator_name = generator
            .as_ref()
            .map_or_else(|| "none".to_string(), |g| g.name().to_string());
        info!(
            db_path = %config.storage.db_path,
            embedder = embedder.name(),
            generator = %generator_name,
            "pipeline ready"
        );
        Ok(Self::new(
            Collaborators::from_storage(storage, embedder, generator),
            config,
        ))
    }

    pub fn config(&self) -> &PrognosConfig {
        &self.config
    }

    pub fn summary_cache(&self) -> &SummaryCache {
        &self.summary_cache
    }

    fn causal(&self) -> CausalGraphEngine<'_> {
        CausalGraphEngine::with_config(
            self.collaborators.transitions.as_ref(),
            self.collaborators.co_occurrence.as_ref(),
            self.config.causal.clone(),
        )
    }

    fn retriever(&self) -> KnowledgeRetriever<'_> {
        KnowledgeRetriever::with_config(
            self.collaborators.documents.as_ref(),
            self.collaborators.embedder.as_ref(),
            self.config.retrieval.clone(),
        )
        .with_query_cache(&self.query_cache)
    }

    fn load_history(&self, patient_id: i64) -> PrognosResult<PatientHistory> {
        let history = self.collaborators.history.history(patient_id)?;
        if history.is_empty() {
            return Err(PrognosError::PatientNotFound { patient_id });
        }
        Ok(history)
    }

    fn patient_summary(history: &PatientHistory) -> String {
        let recent: Vec<String> = history
            .recent_codes(PATIENT_SUMMARY_CODES)
            .iter()
            .map(|c| c.to_string())
            .collect();
        format!("Patient with history of {}", recent.join(", "))
    }

    fn summaries_for(
        &self,
        patient_id: i64,
        history: &PatientHistory,
        candidates: &[DiseaseCode],
        fresh_context: bool,
    ) -> PrognosResult<VisitRetrieval> {
        let rc = &self.config.retrieval;
        let query = build_query(
            &history.recent_codes(rc.history_window),
            candidates,
            rc.history_window,
            rc.candidate_window,
        );
        self.retriever().retrieve_for_visit(
            patient_id,
            history.last_visit_id(),
            &query,
            fresh_context,
            &self.summary_cache,
            self.collaborators.predictions.as_ref(),
        )
    }

    /// Persist one request and, on success, warm the in-process summary
    /// cache with summaries computed on a cache miss.
    fn commit(
        &self,
        patient_id: i64,
        visit_id: Option<i64>,
        prediction: Prediction,
        edit: Option<ClinicianEdit>,
        retrieval: VisitRetrieval,
        cache_summaries: bool,
    ) -> PrognosResult<PredictionOutcome> {
        let to_cache = cache_summaries && retrieval.source == SummarySource::Fresh;
        let commit = PredictionCommit {
            patient_id,
            visit_id,
            prediction,
            edit,
            summaries_to_cache: if to_cache {
                retrieval.summaries.clone()
            } else {
                Vec::new()
            },
        };
        let prediction_id = self.collaborators.predictions.commit(&commit)?;

        if let (true, Some(visit_id)) = (to_cache, visit_id) {
            self.summary_cache
                .insert(patient_id, visit_id, retrieval.summaries);
        }
        Ok(PredictionOutcome {
            prediction_id,
            prediction: commit.prediction,
            summary_source: retrieval.source,
        })
    }

    /// Predict the next diagnosis for `patient_id`.
    ///
    /// A non-empty clinician comment forces fresh retrieval and is passed to
    /// ranking. The updated graph, the prediction, and any newly computed
    /// summaries are committed together.
    pub fn predict(
        &self,
        patient_id: i64,
        clinician_comment: Option<&str>,
    ) -> PrognosResult<PredictionOutcome> {
        let lock = self.locks.for_patient(patient_id);
        let _guard = lock
            .lock()
            .map_err(|e| PrognosError::ConcurrencyError(e.to_string()))?;

        let comment = clinician_comment.filter(|c| !c.trim().is_empty());
        let history = self.load_history(patient_id)?;
        let causal = self.causal();

        let candidates = causal.build_candidate_set(&history.current_diseases())?;
        let retrieval = self.summaries_for(
            patient_id,
            &history,
            &candidates.codes(),
            comment.is_some(),
        )?;

        let graph = match self.collaborators.predictions.load_graph(patient_id)? {
            Some(stored) => stored,
            None => causal.initial_graph_for(&candidates)?,
        };
        let graph = causal.fit_graph_with_data(graph)?;
        let graph = causal.iterative_refine(graph, &retrieval.summaries)?;
        warn_on_cycles(patient_id, &causal, &graph);

        let prediction = self.ranking.rank_and_explain(
            &Self::patient_summary(&history),
            &candidates.scored(),
            &graph,
            &retrieval.summaries,
            comment,
        );

        let outcome = self.commit(
            patient_id,
            history.last_visit_id(),
            prediction,
            None,
            retrieval,
            comment.is_none(),
        )?;
        info!(
            patient_id,
            prediction_id = outcome.prediction_id,
            candidates = candidates.len(),
            top = outcome.prediction.top_code().map(|c| c.as_str()).unwrap_or("none"),
            fallback = outcome.prediction.fallback,
            "prediction committed"
        );
        Ok(outcome)
    }

    /// Apply a clinician edit to the stored graph and re-rank.
    pub fn refine(&self, patient_id: i64, edit: &ClinicianEdit) -> PrognosResult<PredictionOutcome> {
        let lock = self.locks.for_patient(patient_id);
        let _guard = lock
            .lock()
            .map_err(|e| PrognosError::ConcurrencyError(e.to_string()))?;

        let history = self.load_history(patient_id)?;
        let causal = self.causal();

        let graph = self
            .collaborators
            .predictions
            .load_graph(patient_id)?
            .unwrap_or_default();
        let graph = causal.apply_clinician_edit(graph, edit)?;
        warn_on_cycles(patient_id, &causal, &graph);

        let candidates = edge_target_candidates(&graph, edit);
        let retrieval = self.summaries_for(patient_id, &history, &candidates.codes(), true)?;

        let prediction = self.ranking.rank_and_explain(
            &Self::patient_summary(&history),
            &candidates.scored(),
            &graph,
            &retrieval.summaries,
            Some(edit.reason.as_str()),
        );

        let outcome = self.commit(
            patient_id,
            history.last_visit_id(),
            prediction,
            Some(edit.clone()),
            retrieval,
            false,
        )?;
        info!(
            patient_id,
            prediction_id = outcome.prediction_id,
            action = %edit.action,
            edges = outcome.prediction.dag.edge_count(),
            "refinement committed"
        );
        Ok(outcome)
    }

    /// The stored graph for `patient_id`, or an empty one.
    pub fn graph(&self, patient_id: i64) -> PrognosResult<CausalGraph> {
        Ok(self
            .collaborators
            .predictions
            .load_graph(patient_id)?
            .unwrap_or_default())
    }

    /// Chunk, embed, and store a knowledge document.
    pub fn ingest_document(
        &self,
        disease_code: &DiseaseCode,
        text: &str,
    ) -> PrognosResult<Vec<IngestedChunk>> {
        self.retriever().ingest(disease_code, text)
    }
}

fn warn_on_cycles(patient_id: i64, causal: &CausalGraphEngine<'_>, graph: &CausalGraph) {
    let cycles = causal.cycle_report(graph);
    if !cycles.is_empty() {
        warn!(
            patient_id,
            cycles = cycles.len(),
            first = ?cycles[0].iter().map(|c| c.as_str()).collect::<Vec<_>>(),
            "causal graph contains cycles"
        );
    } else {
        debug!(patient_id, "causal graph is acyclic");
    }
}

/// Edge targets weighted by their edge, strongest first. A graph without
/// edges ranks the edit's endpoints at a neutral score.
fn edge_target_candidates(graph: &CausalGraph, edit: &ClinicianEdit) -> CandidateSet {
    let candidate = |code: &DiseaseCode, probability: f64| Candidate {
        code: code.clone(),
        probability,
        support_count: 0,
    };
    if graph.edge_count() == 0 {
        return CandidateSet::from_max_merge([
            candidate(&edit.from, NODE_ONLY_CANDIDATE_SCORE),
            candidate(&edit.to, NODE_ONLY_CANDIDATE_SCORE),
        ]);
    }
    CandidateSet::from_max_merge(graph.edges().iter().map(|e| candidate(&e.to, e.weight)))
}
