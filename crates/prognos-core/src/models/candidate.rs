use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::disease::DiseaseCode;

/// A disease code reachable from the patient's current diagnoses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub code: DiseaseCode,
    pub probability: f64,
    pub support_count: u64,
}

/// Ordered, duplicate-free candidates, non-increasing by probability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Merge candidates by code keeping the maximum probability, then sort
    /// descending. Ties keep first-seen order.
    pub fn from_max_merge(items: impl IntoIterator<Item = Candidate>) -> Self {
        let mut position: HashMap<DiseaseCode, usize> = HashMap::new();
        let mut candidates: Vec<Candidate> = Vec::new();

        for item in items {
            match position.get(&item.code) {
                Some(&idx) => {
                    if item.probability > candidates[idx].probability {
                        candidates[idx] = item;
                    }
                }
                None => {
                    position.insert(item.code.clone(), candidates.len());
                    candidates.push(item);
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
        Self { candidates }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Codes in rank order.
    pub fn codes(&self) -> Vec<DiseaseCode> {
        self.candidates.iter().map(|c| c.code.clone()).collect()
    }

    /// The first `n` codes in rank order.
    pub fn top_codes(&self, n: usize) -> Vec<DiseaseCode> {
        self.candidates.iter().take(n).map(|c| c.code.clone()).collect()
    }

    /// `(code, probability)` pairs in rank order, as consumed by ranking.
    pub fn scored(&self) -> Vec<(DiseaseCode, f64)> {
        self.candidates
            .iter()
            .map(|c| (c.code.clone(), c.probability))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(code: &str, p: f64) -> Candidate {
        Candidate {
            code: code.into(),
            probability: p,
            support_count: 1,
        }
    }

    #[test]
    fn merge_keeps_maximum_not_sum() {
        let set = CandidateSet::from_max_merge(vec![cand("X", 0.40), cand("X", 0.70)]);
        assert_eq!(set.len(), 1);
        assert!((set.scored()[0].1 - 0.70).abs() < f64::EPSILON);
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let set = CandidateSet::from_max_merge(vec![
            cand("A", 0.2),
            cand("B", 0.5),
            cand("C", 0.2),
        ]);
        let codes: Vec<String> = set.codes().iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, vec!["B", "A", "C"]);
    }
}
