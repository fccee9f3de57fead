//! RankingEngine: model path under a deadline, deterministic fallback otherwise.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use prognos_core::config::RankingConfig;
use prognos_core::errors::{GenerationError, PrognosResult};
use prognos_core::models::{CausalGraph, DiseaseCode, DocumentSummary, Prediction};
use prognos_core::traits::ITextGenerator;

use crate::fallback::deterministic_fallback;
use crate::model_output::prediction_from_model;
use crate::parse::parse_model_output;
use crate::prompt::build_prompt;

/// Ranks candidates with an optional text generator.
pub struct RankingEngine {
    generator: Option<Arc<dyn ITextGenerator>>,
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(generator: Option<Arc<dyn ITextGenerator>>, config: RankingConfig) -> Self {
        Self { generator, config }
    }

    /// Engine that always uses the deterministic scorer.
    pub fn deterministic(config: RankingConfig) -> Self {
        Self::new(None, config)
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Rank `candidates` (code, transition probability) and explain the result.
    ///
    /// Never fails: generation errors, timeouts, and unparseable output all
    /// produce the deterministic ranking with `fallback = true`.
    pub fn rank_and_explain(
        &self,
        patient_summary: &str,
        candidates: &[(DiseaseCode, f64)],
        graph: &CausalGraph,
        summaries: &[DocumentSummary],
        clinician_comment: Option<&str>,
    ) -> Prediction {
        if candidates.is_empty() {
            return Prediction::no_candidates(graph.clone());
        }

        if let Some(generator) = &self.generator {
            let prompt = build_prompt(patient_summary, candidates, summaries, clinician_comment);
            match self.generate_bounded(Arc::clone(generator), prompt) {
                Ok(raw) => match parse_model_output(&raw) {
                    Some(value) => {
                        let prediction =
                            prediction_from_model(&value, graph, self.config.explanation_max_chars);
                        debug!(
                            generator = generator.name(),
                            predictions = prediction.predictions.len(),
                            "model ranking accepted"
                        );
                        return prediction;
                    }
                    None => warn!(
                        generator = generator.name(),
                        "model output unparseable, using deterministic ranking"
                    ),
                },
                Err(e) => warn!(
                    generator = generator.name(),
                    error = %e,
                    "generation failed, using deterministic ranking"
                ),
            }
        }

        deterministic_fallback(candidates, graph, summaries, clinician_comment, &self.config)
    }

    /// Run the generator on a worker thread and wait at most the configured
    /// timeout. A late result is discarded with the abandoned worker.
    fn generate_bounded(
        &self,
        generator: Arc<dyn ITextGenerator>,
        prompt: String,
    ) -> PrognosResult<String> {
        let timeout_ms = self.config.generation_timeout_ms;
        let timeout = Duration::from_millis(timeout_ms);
        let max_tokens = self.config.max_tokens;
        let (tx, rx) = mpsc::channel();

        std::thread::Builder::new()
            .name("prognos-generate".to_string())
            .spawn(move || {
                // The receiver is gone once the caller timed out.
                let _ = tx.send(generator.generate(&prompt, max_tokens, timeout));
            })
            .map_err(|e| GenerationError::RequestFailed {
                reason: format!("failed to spawn generation worker: {e}"),
            })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(GenerationError::Timeout { timeout_ms }.into()),
            Err(RecvTimeoutError::Disconnected) => Err(GenerationError::RequestFailed {
                reason: "generation worker exited without a result".to_string(),
            }
            .into()),
        }
    }
}
