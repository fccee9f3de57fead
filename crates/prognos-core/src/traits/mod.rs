//! Collaborator interfaces. Every pipeline stage depends on these, never on
//! a concrete store or model.

mod co_occurrence_store;
mod document_store;
mod embedding;
mod generator;
mod patient_history;
mod prediction_store;
mod transition_store;

pub use co_occurrence_store::ICoOccurrenceStore;
pub use document_store::IDocumentStore;
pub use embedding::IEmbeddingProvider;
pub use generator::ITextGenerator;
pub use patient_history::IPatientHistory;
pub use prediction_store::IPredictionStore;
pub use transition_store::ITransitionStore;
