//! # prognos-retrieval
//!
//! Finds the knowledge documents most relevant to a patient and reduces them
//! to short extractive summaries.
//!
//! ```text
//! history + candidates
//!   └─ build_query ─► embed_query (blake3-keyed cache) ─► cosine scan (rayon)
//!        └─ stable sort, top-k ─► extractive_summary ─► DocumentSummary
//! ```
//!
//! Per-visit results are reused from the in-process [`SummaryCache`] or the
//! durable store unless the caller asks for fresh context.

pub mod cache;
pub mod ingest;
pub mod providers;
pub mod query;
pub mod retriever;
pub mod similarity;
pub mod summary;

pub use cache::{QueryEmbeddingCache, SummaryCache};
pub use ingest::{chunk_text, IngestedChunk};
pub use providers::{create_provider, HashedTfIdf, OllamaEmbedder};
pub use query::build_query;
pub use retriever::{KnowledgeRetriever, SummarySource, VisitRetrieval};
pub use similarity::cosine_similarity;
pub use summary::extractive_summary;
