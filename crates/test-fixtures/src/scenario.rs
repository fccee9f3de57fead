//! Typed clinical scenarios loaded from `data/scenarios/*.json`.

use chrono::NaiveDate;
use serde::Deserialize;

use prognos_core::models::{
    CoOccurrence, PatientHistory, TransitionEdge, VisitDiagnosis,
};
use prognos_core::traits::IEmbeddingProvider;

use crate::stores::{InMemoryCoOccurrence, InMemoryDocuments, InMemoryHistory, InMemoryTransitions};

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioVisit {
    pub visit_id: i64,
    pub visit_date: NaiveDate,
    pub diagnoses: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioDocument {
    pub disease_code: String,
    pub section: String,
    pub content: String,
}

/// One patient plus the population statistics and corpus around them.
#[derive(Debug, Clone, Deserialize)]
pub struct ClinicalScenario {
    pub patient_id: i64,
    pub visits: Vec<ScenarioVisit>,
    pub transitions: Vec<TransitionEdge>,
    pub co_occurrences: Vec<CoOccurrence>,
    pub documents: Vec<ScenarioDocument>,
}

impl ClinicalScenario {
    pub fn history(&self) -> PatientHistory {
        let rows = self
            .visits
            .iter()
            .flat_map(|v| {
                v.diagnoses.iter().map(move |code| VisitDiagnosis {
                    visit_id: v.visit_id,
                    visit_date: v.visit_date,
                    disease_code: code.as_str().into(),
                    disease_name: None,
                })
            })
            .collect();
        PatientHistory::new(self.patient_id, rows)
    }

    pub fn history_store(&self) -> InMemoryHistory {
        InMemoryHistory::default().with_history(self.history())
    }

    pub fn transition_store(&self) -> InMemoryTransitions {
        InMemoryTransitions::from_edges(self.transitions.clone())
    }

    pub fn co_occurrence_store(&self) -> InMemoryCoOccurrence {
        InMemoryCoOccurrence::from_records(self.co_occurrences.clone())
    }

    /// Corpus embedded with `embedder`. Doc ids start at 1 in file order.
    pub fn document_store(&self, embedder: &dyn IEmbeddingProvider) -> InMemoryDocuments {
        let docs = InMemoryDocuments::default();
        for d in &self.documents {
            docs.add(embedder, &d.disease_code, &d.section, &d.content);
        }
        docs
    }
}
