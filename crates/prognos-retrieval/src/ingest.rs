//! Splitting plain text into embeddable chunks.

use serde::{Deserialize, Serialize};

/// A stored chunk of an ingested document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestedChunk {
    pub doc_id: i64,
    pub section: String,
    /// Extractive preview of the chunk.
    pub preview: String,
}

/// Split on whitespace into chunks of at most `max_words` words.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}
