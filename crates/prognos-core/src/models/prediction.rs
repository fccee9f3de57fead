use serde::{Deserialize, Serialize};

use super::causal_graph::CausalGraph;
use super::disease::DiseaseCode;
use crate::constants::NO_CANDIDATES_EXPLANATION;

/// One ranked next-diagnosis hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub code: DiseaseCode,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub transition_score: f64,
    #[serde(default)]
    pub doc_similarity: f64,
    /// Strongest graph edge touching the code. Reported, not scored.
    #[serde(default)]
    pub dag_score: f64,
    #[serde(default)]
    pub clinician_boost: f64,
    /// 1-based, dense.
    #[serde(default)]
    pub rank: usize,
}

/// A supporting document excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default)]
    pub doc_id: Option<i64>,
    pub disease_code: DiseaseCode,
    pub snippet: String,
    #[serde(default)]
    pub similarity: f64,
}

/// Ranked predictions with their explanation and the graph they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predictions: Vec<RankedCandidate>,
    pub explanation: String,
    pub evidence: Vec<EvidenceItem>,
    pub dag: CausalGraph,
    /// True when the deterministic scorer produced the ranking.
    pub fallback: bool,
}

impl Prediction {
    /// Response for an empty candidate set. Not a fallback.
    pub fn no_candidates(dag: CausalGraph) -> Self {
        Self {
            predictions: Vec::new(),
            explanation: NO_CANDIDATES_EXPLANATION.to_string(),
            evidence: Vec::new(),
            dag,
            fallback: false,
        }
    }

    /// Code of the best-ranked candidate.
    pub fn top_code(&self) -> Option<&DiseaseCode> {
        self.predictions.first().map(|p| &p.code)
    }
}
