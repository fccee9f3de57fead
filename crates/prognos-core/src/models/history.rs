use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::disease::DiseaseCode;

/// One diagnosis recorded at one visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitDiagnosis {
    pub visit_id: i64,
    pub visit_date: NaiveDate,
    pub disease_code: DiseaseCode,
    #[serde(default)]
    pub disease_name: Option<String>,
}

/// A patient's diagnoses in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientHistory {
    pub patient_id: i64,
    diagnoses: Vec<VisitDiagnosis>,
}

impl PatientHistory {
    /// Orders rows by visit date, then visit id.
    pub fn new(patient_id: i64, mut diagnoses: Vec<VisitDiagnosis>) -> Self {
        diagnoses.sort_by(|a, b| {
            a.visit_date
                .cmp(&b.visit_date)
                .then(a.visit_id.cmp(&b.visit_id))
        });
        Self {
            patient_id,
            diagnoses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }

    pub fn diagnoses(&self) -> &[VisitDiagnosis] {
        &self.diagnoses
    }

    pub fn last_visit_id(&self) -> Option<i64> {
        self.diagnoses.last().map(|d| d.visit_id)
    }

    /// Distinct codes diagnosed at the most recent visit, first-seen order.
    pub fn current_diseases(&self) -> Vec<DiseaseCode> {
        let Some(last) = self.last_visit_id() else {
            return Vec::new();
        };
        let mut codes: Vec<DiseaseCode> = Vec::new();
        for d in self.diagnoses.iter().filter(|d| d.visit_id == last) {
            if !codes.contains(&d.disease_code) {
                codes.push(d.disease_code.clone());
            }
        }
        codes
    }

    /// The last `n` recorded codes, oldest first. Repeats are kept.
    pub fn recent_codes(&self, n: usize) -> Vec<DiseaseCode> {
        let skip = self.diagnoses.len().saturating_sub(n);
        self.diagnoses[skip..]
            .iter()
            .map(|d| d.disease_code.clone())
            .collect()
    }
}
