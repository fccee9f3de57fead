//! Signed feature-hashing TF-IDF provider.
//!
//! Deterministic and local. Diagnostic codes such as `E11.9` stay single
//! tokens, so documents and queries mentioning the same code line up.

use std::collections::HashMap;

use prognos_core::errors::PrognosResult;
use prognos_core::traits::IEmbeddingProvider;

/// Hashes each term into one of `dimensions` buckets with a blake3-derived
/// sign, weights by sublinear term frequency, and L2-normalizes.
pub struct HashedTfIdf {
    dimensions: usize,
}

impl HashedTfIdf {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Lower-case terms. Splits on anything but alphanumerics and inner dots.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '.'))
            .map(|t| t.trim_matches('.'))
            .filter(|t| t.chars().count() >= 2)
            .map(|t| t.to_lowercase())
            .collect()
    }

    fn bucket_and_sign(&self, term: &str) -> (usize, f32) {
        let hash = blake3::hash(term.as_bytes());
        let bytes = hash.as_bytes();
        let mut head = [0u8; 8];
        head.copy_from_slice(&bytes[..8]);
        let bucket = (u64::from_le_bytes(head) % self.dimensions as u64) as usize;
        let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec;
        }

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for tok in &tokens {
            *counts.entry(tok.as_str()).or_default() += 1;
        }

        for (term, count) in counts {
            let tf = 1.0 + (count as f32).ln();
            // Longer terms are rarer in clinical prose.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            let (bucket, sign) = self.bucket_and_sign(term);
            vec[bucket] += sign * tf * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedTfIdf {
    fn embed(&self, text: &str) -> PrognosResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> PrognosResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
