//! Data model shared by every stage of the pipeline.

mod candidate;
mod causal_graph;
mod clinician_edit;
mod commit;
mod disease;
mod document;
mod history;
mod prediction;

pub use candidate::{Candidate, CandidateSet};
pub use causal_graph::{clamp_weight, CausalEdge, CausalGraph, GraphNode, ModificationRecord, NodeId};
pub use clinician_edit::{ClinicianAction, ClinicianEdit};
pub use commit::PredictionCommit;
pub use disease::{CoOccurrence, DiseaseCode, TransitionEdge};
pub use document::{DocumentSummary, StoredDocument};
pub use history::{PatientHistory, VisitDiagnosis};
pub use prediction::{EvidenceItem, Prediction, RankedCandidate};
