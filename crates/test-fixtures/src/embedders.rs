//! Deterministic embedders with predictable geometry.

use std::sync::atomic::{AtomicUsize, Ordering};

use prognos_core::errors::PrognosResult;
use prognos_core::traits::IEmbeddingProvider;

/// One dimension per vocabulary word; each component counts substring hits
/// in the lower-cased text. Counts `embed` calls.
#[derive(Debug)]
pub struct KeywordEmbedder {
    vocabulary: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of texts embedded so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .map(|w| lower.matches(w.as_str()).count() as f32)
            .collect()
    }
}

impl Default for KeywordEmbedder {
    fn default() -> Self {
        Self::new(&[
            "kidney",
            "heart",
            "diabetes",
            "hypertension",
            "anemia",
            "failure",
            "progression",
            "risk",
            "stage",
            "lipid",
        ])
    }
}

impl IEmbeddingProvider for KeywordEmbedder {
    fn embed(&self, text: &str) -> PrognosResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> PrognosResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        "keyword"
    }

    fn is_available(&self) -> bool {
        true
    }
}
