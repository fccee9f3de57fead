//! Deterministic ranking used whenever the model path yields nothing.

use std::cmp::Ordering;

use prognos_core::config::RankingConfig;
use prognos_core::models::{
    CausalGraph, DiseaseCode, DocumentSummary, EvidenceItem, Prediction, RankedCandidate,
};

use crate::text::{round3, truncate_chars};

const CLINICIAN_EXCERPT_CHARS: usize = 100;
const NO_PROGRESSION_EXPLANATION: &str = "No clear progression identified.";

/// Weighted score of transition probability, best document similarity, and
/// clinician boost. The strongest graph edge touching a candidate is
/// reported as `dag_score` but does not contribute to the score.
pub fn deterministic_fallback(
    candidates: &[(DiseaseCode, f64)],
    graph: &CausalGraph,
    summaries: &[DocumentSummary],
    clinician_comment: Option<&str>,
    config: &RankingConfig,
) -> Prediction {
    let comment = clinician_comment.filter(|c| !c.is_empty());
    let comment_lower = comment.map(str::to_lowercase);
    let keyword_hit = comment_lower.as_deref().is_some_and(|c| {
        config
            .boost_keywords
            .iter()
            .any(|k| c.contains(k.to_lowercase().as_str()))
    });

    let mut scored: Vec<RankedCandidate> = candidates
        .iter()
        .map(|(code, transition)| {
            let doc_similarity = summaries
                .iter()
                .filter(|s| &s.disease_code == code)
                .map(|s| s.similarity)
                .fold(0.0, f64::max);
            let mentioned = comment_lower
                .as_deref()
                .is_some_and(|c| c.contains(code.as_str().to_lowercase().as_str()));
            let clinician_boost = if keyword_hit || mentioned {
                config.clinician_boost
            } else {
                0.0
            };
            let dag_score = graph.max_weight_touching(code).unwrap_or(0.0);
            let score = config.transition_weight * transition
                + config.document_weight * doc_similarity
                + config.clinician_weight * clinician_boost;

            RankedCandidate {
                code: code.clone(),
                score: round3(score),
                transition_score: round3(*transition),
                doc_similarity: round3(doc_similarity),
                dag_score: round3(dag_score),
                clinician_boost: round3(clinician_boost),
                rank: 0,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    for (i, c) in scored.iter_mut().enumerate() {
        c.rank = i + 1;
    }

    let explanation = match scored.first() {
        Some(top) => {
            let mut text = format!(
                "Based on transition probability ({:.2}) and document evidence ({:.2}), {} is the most likely progression. ",
                top.transition_score, top.doc_similarity, top.code
            );
            if let Some(c) = comment {
                text.push_str("Clinician input considered: ");
                text.push_str(truncate_chars(c, CLINICIAN_EXCERPT_CHARS));
            }
            text
        }
        None => NO_PROGRESSION_EXPLANATION.to_string(),
    };

    let evidence = summaries
        .iter()
        .take(config.evidence_limit)
        .map(|s| EvidenceItem {
            doc_id: Some(s.doc_id),
            disease_code: s.disease_code.clone(),
            snippet: truncate_chars(&s.summary, config.snippet_max_chars).to_string(),
            similarity: round3(s.similarity),
        })
        .collect();

    scored.truncate(config.top_n);
    Prediction {
        predictions: scored,
        explanation: truncate_chars(&explanation, config.explanation_max_chars).to_string(),
        evidence,
        dag: graph.clone(),
        fallback: true,
    }
}
