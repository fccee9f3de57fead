use crate::errors::PrognosResult;
use crate::models::{DiseaseCode, StoredDocument};

/// Knowledge documents with precomputed embeddings.
pub trait IDocumentStore: Send + Sync {
    /// Every stored document.
    fn list_all(&self) -> PrognosResult<Vec<StoredDocument>>;

    /// Store a document and return its id.
    fn insert(
        &self,
        disease_code: &DiseaseCode,
        section: &str,
        content: &str,
        embedding: &[f32],
    ) -> PrognosResult<i64>;
}
