//! # prognos-pipeline
//!
//! Wires the retrieval, causal, and ranking stages into two request-scoped
//! operations:
//!
//! - **predict**: history → candidates → summaries → graph (load or build,
//!   fit, refine) → rank → atomic commit
//! - **refine**: stored graph → clinician edit → summaries → rank → atomic commit
//!
//! Each patient's load → mutate → persist sequence runs under that patient's
//! lock; different patients never contend.

pub mod collaborators;
pub mod locks;
pub mod pipeline;
pub mod tracing_setup;

pub use collaborators::Collaborators;
pub use locks::PatientLocks;
pub use pipeline::{PredictionOutcome, PredictionPipeline};
pub use tracing_setup::init_tracing;
