use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque diagnostic code (e.g. ICD-10 "E11.9"). Compared by exact string
/// equality; no hierarchy is implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseCode(String);

impl DiseaseCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, used when matching document codes to edges.
    pub fn eq_ignore_case(&self, other: &DiseaseCode) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for DiseaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DiseaseCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for DiseaseCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for DiseaseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DiseaseCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Population-level observation that `to` followed `from` in a later visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub from: DiseaseCode,
    pub to: DiseaseCode,
    /// Conditional probability P(to | from), in [0, 1].
    pub probability: f64,
    pub support_count: u64,
}

/// How often two diagnoses were recorded for the same patients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrence {
    pub disease_a: DiseaseCode,
    pub disease_b: DiseaseCode,
    pub count: u64,
    pub total_population: u64,
}

impl CoOccurrence {
    /// `count / total_population`, or `None` for an empty population.
    pub fn probability(&self) -> Option<f64> {
        if self.total_population == 0 {
            None
        } else {
            Some(self.count as f64 / self.total_population as f64)
        }
    }
}
