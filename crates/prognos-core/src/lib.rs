//! # prognos-core
//!
//! Foundation crate for the Prognos disease-progression pipeline.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PrognosConfig;
pub use errors::{PrognosError, PrognosResult};
pub use models::{
    CandidateSet, CausalEdge, CausalGraph, ClinicianAction, ClinicianEdit, DiseaseCode,
    DocumentSummary, Prediction,
};
