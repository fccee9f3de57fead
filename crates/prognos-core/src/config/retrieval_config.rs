use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Documents returned per query.
    pub top_k: usize,
    /// Character budget of an extractive summary.
    pub summary_max_chars: usize,
    /// Most recent history codes included in a query.
    pub history_window: usize,
    /// Leading candidate codes included in a query.
    pub candidate_window: usize,
    /// Entries kept in the in-process summary cache.
    pub cache_capacity: u64,
    /// Lifetime of an in-process summary cache entry.
    pub cache_ttl_secs: u64,
    /// Word budget of one ingested chunk.
    pub chunk_max_words: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            summary_max_chars: defaults::DEFAULT_SUMMARY_MAX_CHARS,
            history_window: defaults::DEFAULT_HISTORY_WINDOW,
            candidate_window: defaults::DEFAULT_CANDIDATE_WINDOW,
            cache_capacity: defaults::DEFAULT_SUMMARY_CACHE_CAPACITY,
            cache_ttl_secs: defaults::DEFAULT_SUMMARY_CACHE_TTL_SECS,
            chunk_max_words: defaults::DEFAULT_CHUNK_MAX_WORDS,
        }
    }
}
