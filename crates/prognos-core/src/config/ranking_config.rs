use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::CLINICIAN_BOOST_KEYWORDS;

/// Ranking engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Token budget handed to the generator.
    pub max_tokens: u32,
    /// Hard deadline for one generation call.
    pub generation_timeout_ms: u64,
    /// Fallback score weight of the transition probability.
    pub transition_weight: f64,
    /// Fallback score weight of document similarity.
    pub document_weight: f64,
    /// Fallback score weight of the clinician boost.
    pub clinician_weight: f64,
    /// Boost granted when the clinician comment mentions a candidate.
    pub clinician_boost: f64,
    /// Comment keywords that grant the boost to every candidate.
    pub boost_keywords: Vec<String>,
    /// Predictions returned by the fallback.
    pub top_n: usize,
    pub explanation_max_chars: usize,
    pub evidence_limit: usize,
    pub snippet_max_chars: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            generation_timeout_ms: defaults::DEFAULT_GENERATION_TIMEOUT_MS,
            transition_weight: defaults::DEFAULT_TRANSITION_WEIGHT,
            document_weight: defaults::DEFAULT_DOCUMENT_WEIGHT,
            clinician_weight: defaults::DEFAULT_CLINICIAN_WEIGHT,
            clinician_boost: defaults::DEFAULT_CLINICIAN_BOOST,
            boost_keywords: CLINICIAN_BOOST_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            top_n: defaults::DEFAULT_TOP_N,
            explanation_max_chars: defaults::DEFAULT_EXPLANATION_MAX_CHARS,
            evidence_limit: defaults::DEFAULT_EVIDENCE_LIMIT,
            snippet_max_chars: defaults::DEFAULT_SNIPPET_MAX_CHARS,
        }
    }
}
