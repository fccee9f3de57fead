use serde::{Deserialize, Serialize};

use super::disease::DiseaseCode;

/// A medical knowledge document with its precomputed embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub doc_id: i64,
    pub disease_code: DiseaseCode,
    pub section: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

/// A retrieved document reduced to an extractive summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub doc_id: i64,
    pub disease_code: DiseaseCode,
    pub section: String,
    /// Leading sentences of the document, at most the configured character budget.
    pub summary: String,
    /// Cosine similarity to the query, in [0, 1].
    pub similarity: f64,
    /// Full document text, kept for evidence scanning. Empty for cached summaries.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl DocumentSummary {
    /// Text scanned for causal phrases: the full content when known.
    pub fn evidence_text(&self) -> &str {
        if self.content.is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }
}
