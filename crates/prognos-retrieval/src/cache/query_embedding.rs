//! Query embedding cache using moka.
//!
//! Keys are blake3 hashes of the query text, so identical queries across
//! patients share one embedding.

use std::time::Duration;

use moka::sync::Cache;

/// Memoises query embeddings by content hash.
pub struct QueryEmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryEmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    /// Content hash used as the cache key.
    pub fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(text))
    }

    pub fn insert(&self, text: &str, embedding: Vec<f32>) {
        self.cache.insert(Self::key(text), embedding);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
