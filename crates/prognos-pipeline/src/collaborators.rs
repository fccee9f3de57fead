//! The injected implementations every pipeline stage depends on.

use std::sync::Arc;

use prognos_core::traits::{
    ICoOccurrenceStore, IDocumentStore, IEmbeddingProvider, IPatientHistory, IPredictionStore,
    ITextGenerator, ITransitionStore,
};
use prognos_storage::StorageEngine;

/// Shared handles to every collaborator. Cheap to clone.
#[derive(Clone)]
pub struct Collaborators {
    pub history: Arc<dyn IPatientHistory>,
    pub transitions: Arc<dyn ITransitionStore>,
    pub co_occurrence: Arc<dyn ICoOccurrenceStore>,
    pub documents: Arc<dyn IDocumentStore>,
    pub predictions: Arc<dyn IPredictionStore>,
    pub embedder: Arc<dyn IEmbeddingProvider>,
    /// `None` ranks deterministically.
    pub generator: Option<Arc<dyn ITextGenerator>>,
}

impl Collaborators {
    /// Every store backed by one SQLite engine.
    pub fn from_storage(
        storage: Arc<StorageEngine>,
        embedder: Arc<dyn IEmbeddingProvider>,
        generator: Option<Arc<dyn ITextGenerator>>,
    ) -> Self {
        Self {
            history: storage.clone(),
            transitions: storage.clone(),
            co_occurrence: storage.clone(),
            documents: storage.clone(),
            predictions: storage,
            embedder,
            generator,
        }
    }
}
