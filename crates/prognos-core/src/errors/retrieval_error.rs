/// Knowledge retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("nothing to ingest for {disease_code}")]
    EmptyDocument { disease_code: String },
}
