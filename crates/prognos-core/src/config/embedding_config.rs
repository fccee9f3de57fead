use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider name: "tfidf" or "ollama".
    pub provider: String,
    /// Model name passed to remote providers.
    pub model: String,
    /// Output vector dimensions.
    pub dimensions: usize,
    /// Base URL for HTTP providers.
    pub base_url: String,
    /// Per-request timeout for HTTP providers.
    pub request_timeout_secs: u64,
    /// Entries kept in the query embedding cache.
    pub query_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            base_url: defaults::DEFAULT_OLLAMA_BASE_URL.to_string(),
            request_timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
