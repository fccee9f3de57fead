//! Conversion of a recovered model object into a [`Prediction`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use prognos_core::models::{CausalGraph, EvidenceItem, Prediction, RankedCandidate};

use crate::text::truncate_chars;

/// Parse an array leniently, skipping items that fail to deserialize.
fn parse_array_lenient<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value.and_then(Value::as_array) {
        None => Vec::new(),
        Some(items) => items
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
    }
}

/// Build a model-path prediction. Missing numeric fields are 0, missing or
/// zero ranks become the 1-based position, and the explanation is truncated.
pub fn prediction_from_model(
    value: &Value,
    dag: &CausalGraph,
    explanation_max_chars: usize,
) -> Prediction {
    let mut predictions: Vec<RankedCandidate> = parse_array_lenient(value.get("predictions"));
    for (position, p) in predictions.iter_mut().enumerate() {
        if p.rank == 0 {
            p.rank = position + 1;
        }
    }

    let explanation = match value.get("explanation") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Prediction {
        predictions,
        explanation: truncate_chars(&explanation, explanation_max_chars).to_string(),
        evidence: parse_array_lenient::<EvidenceItem>(value.get("evidence")),
        dag: dag.clone(),
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bad_items_are_skipped_and_ranks_filled() {
        let value = json!({
            "predictions": [
                {"code": "N18.4", "score": 0.8},
                {"score": 0.5},
                {"code": "I50.9", "score": "high"},
                {"code": "D63.1", "rank": 7}
            ],
            "explanation": "CKD progression is likely."
        });
        let p = prediction_from_model(&value, &CausalGraph::new(), 800);
        let got: Vec<(String, usize, f64)> = p
            .predictions
            .iter()
            .map(|c| (c.code.to_string(), c.rank, c.score))
            .collect();
        assert_eq!(got, vec![("N18.4".to_string(), 1, 0.8), ("D63.1".to_string(), 7, 0.0)]);
        assert!(p.evidence.is_empty());
        assert!(!p.fallback);
    }

    #[test]
    fn explanation_is_truncated() {
        let value = json!({"predictions": [], "explanation": "e".repeat(900)});
        let p = prediction_from_model(&value, &CausalGraph::new(), 800);
        assert_eq!(p.explanation.chars().count(), 800);
    }

    #[test]
    fn evidence_without_doc_id_is_kept() {
        let value = json!({
            "predictions": [],
            "explanation": "ok",
            "evidence": [{"disease_code": "N18.4", "snippet": "risk factors"}, {"snippet": "orphan"}]
        });
        let p = prediction_from_model(&value, &CausalGraph::new(), 800);
        assert_eq!(p.evidence.len(), 1);
        assert_eq!(p.evidence[0].doc_id, None);
    }
}
