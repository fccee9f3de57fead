//! Error taxonomy. One sub-enum per subsystem, folded into [`PrognosError`].

mod embedding_error;
mod generation_error;
mod retrieval_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PrognosError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("patient not found: {patient_id}")]
    PatientNotFound { patient_id: i64 },

    #[error("invalid clinician edit: {reason}")]
    InvalidEdit { reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

/// Convenience alias used across all crates.
pub type PrognosResult<T> = Result<T, PrognosError>;
