//! KnowledgeRetriever: embeds a query, scores every stored document, and
//! returns the top matches as extractive summaries.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use prognos_core::config::RetrievalConfig;
use prognos_core::constants::INGESTED_SECTION_PREFIX;
use prognos_core::errors::{PrognosResult, RetrievalError};
use prognos_core::models::{DiseaseCode, DocumentSummary};
use prognos_core::traits::{IDocumentStore, IEmbeddingProvider, IPredictionStore};

use crate::cache::{QueryEmbeddingCache, SummaryCache};
use crate::ingest::{chunk_text, IngestedChunk};
use crate::similarity::cosine_similarity;
use crate::summary::extractive_summary;

/// Where the summaries of a visit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    /// In-process cache hit.
    Memory,
    /// Durable cache hit.
    Durable,
    /// Computed by this call; not yet cached.
    Fresh,
}

/// Summaries for one visit with their provenance.
#[derive(Debug, Clone)]
pub struct VisitRetrieval {
    pub summaries: Vec<DocumentSummary>,
    pub source: SummarySource,
}

/// Semantic search over the knowledge corpus.
pub struct KnowledgeRetriever<'a> {
    documents: &'a dyn IDocumentStore,
    embedder: &'a dyn IEmbeddingProvider,
    query_cache: Option<&'a QueryEmbeddingCache>,
    config: RetrievalConfig,
}

impl<'a> KnowledgeRetriever<'a> {
    pub fn new(documents: &'a dyn IDocumentStore, embedder: &'a dyn IEmbeddingProvider) -> Self {
        Self::with_config(documents, embedder, RetrievalConfig::default())
    }

    pub fn with_config(
        documents: &'a dyn IDocumentStore,
        embedder: &'a dyn IEmbeddingProvider,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            documents,
            embedder,
            query_cache: None,
            config,
        }
    }

    /// Memoise query embeddings in `cache`.
    pub fn with_query_cache(mut self, cache: &'a QueryEmbeddingCache) -> Self {
        self.query_cache = Some(cache);
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Embed a query, consulting the query cache first.
    pub fn embed_query(&self, text: &str) -> PrognosResult<Vec<f32>> {
        if let Some(hit) = self.query_cache.and_then(|c| c.get(text)) {
            return Ok(hit);
        }
        let embedding = self.embedder.embed(text)?;
        if let Some(cache) = self.query_cache {
            cache.insert(text, embedding.clone());
        }
        Ok(embedding)
    }

    /// The `k` documents most similar to `query`, best first.
    /// Equal similarities keep corpus order.
    pub fn retrieve_top_k(&self, query: &str, k: usize) -> PrognosResult<Vec<DocumentSummary>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let query_vec = self.embed_query(query)?;
        let docs = self.documents.list_all()?;
        if docs.is_empty() {
            debug!("knowledge corpus is empty");
            return Ok(Vec::new());
        }

        let mismatched = docs
            .iter()
            .filter(|d| d.embedding.len() != query_vec.len())
            .count();
        if mismatched > 0 {
            warn!(
                mismatched,
                expected = query_vec.len(),
                "documents with foreign embedding dimensions score zero"
            );
        }

        let mut scored: Vec<(usize, f64)> = docs
            .par_iter()
            .enumerate()
            .map(|(i, d)| (i, cosine_similarity(&query_vec, &d.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        let max_chars = self.config.summary_max_chars;
        let summaries: Vec<DocumentSummary> = scored
            .into_iter()
            .map(|(i, similarity)| {
                let doc = &docs[i];
                DocumentSummary {
                    doc_id: doc.doc_id,
                    disease_code: doc.disease_code.clone(),
                    section: doc.section.clone(),
                    summary: extractive_summary(&doc.content, max_chars),
                    similarity,
                    content: doc.content.clone(),
                }
            })
            .collect();

        debug!(
            corpus = docs.len(),
            returned = summaries.len(),
            best = summaries.first().map(|s| s.similarity).unwrap_or(0.0),
            "retrieved documents"
        );
        Ok(summaries)
    }

    /// Summaries for a visit. Reuses the in-process cache, then the durable
    /// cache, unless `fresh_context` is set or there is no visit to key on.
    pub fn retrieve_for_visit(
        &self,
        patient_id: i64,
        visit_id: Option<i64>,
        query: &str,
        fresh_context: bool,
        memory: &SummaryCache,
        durable: &dyn IPredictionStore,
    ) -> PrognosResult<VisitRetrieval> {
        if let (Some(visit_id), false) = (visit_id, fresh_context) {
            if let Some(hit) = memory.get(patient_id, visit_id) {
                debug!(patient_id, visit_id, "summary cache hit (memory)");
                return Ok(VisitRetrieval {
                    summaries: hit.as_ref().clone(),
                    source: SummarySource::Memory,
                });
            }
            let stored = durable.cached_summaries(patient_id, visit_id)?;
            if !stored.is_empty() {
                debug!(patient_id, visit_id, count = stored.len(), "summary cache hit (durable)");
                memory.insert(patient_id, visit_id, stored.clone());
                return Ok(VisitRetrieval {
                    summaries: stored,
                    source: SummarySource::Durable,
                });
            }
        }

        let summaries = self.retrieve_top_k(query, self.config.top_k)?;
        Ok(VisitRetrieval {
            summaries,
            source: SummarySource::Fresh,
        })
    }

    /// Chunk, embed, and store a plain-text document under `disease_code`.
    pub fn ingest(&self, disease_code: &DiseaseCode, text: &str) -> PrognosResult<Vec<IngestedChunk>> {
        let chunks = chunk_text(text, self.config.chunk_max_words);
        if chunks.is_empty() {
            return Err(RetrievalError::EmptyDocument {
                disease_code: disease_code.to_string(),
            }
            .into());
        }

        let embeddings = self.embedder.embed_batch(&chunks)?;
        let mut stored = Vec::with_capacity(chunks.len());
        for (i, (chunk, embedding)) in chunks.iter().zip(&embeddings).enumerate() {
            let section = format!("{INGESTED_SECTION_PREFIX}_{i}");
            let doc_id = self.documents.insert(disease_code, &section, chunk, embedding)?;
            stored.push(IngestedChunk {
                doc_id,
                section,
                preview: extractive_summary(chunk, self.config.summary_max_chars),
            });
        }

        info!(disease_code = %disease_code, chunks = stored.len(), "ingested document");
        Ok(stored)
    }
}
