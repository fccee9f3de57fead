//! In-process caches owned by the caller and scoped to its lifetime.

mod query_embedding;
mod summary_cache;

pub use query_embedding::QueryEmbeddingCache;
pub use summary_cache::SummaryCache;
