//! Per-visit summary cache using moka.
//!
//! Keyed by `(patient_id, visit_id)`. Bounded by entry count and a
//! time-to-live; entries for one patient can be dropped explicitly.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use prognos_core::config::RetrievalConfig;
use prognos_core::models::DocumentSummary;

/// Retrieved summaries for recent visits.
pub struct SummaryCache {
    cache: Cache<(i64, i64), Arc<Vec<DocumentSummary>>>,
}

impl SummaryCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();
        Self { cache }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.cache_capacity, Duration::from_secs(config.cache_ttl_secs))
    }

    pub fn get(&self, patient_id: i64, visit_id: i64) -> Option<Arc<Vec<DocumentSummary>>> {
        self.cache.get(&(patient_id, visit_id))
    }

    pub fn insert(&self, patient_id: i64, visit_id: i64, summaries: Vec<DocumentSummary>) {
        self.cache.insert((patient_id, visit_id), Arc::new(summaries));
    }

    pub fn invalidate(&self, patient_id: i64, visit_id: i64) {
        self.cache.invalidate(&(patient_id, visit_id));
    }

    /// Drop every visit of one patient.
    pub fn invalidate_patient(&self, patient_id: i64) {
        // Only fails when closures are unsupported, which `new` enables.
        let _ = self
            .cache
            .invalidate_entries_if(move |(pid, _), _| *pid == patient_id);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
