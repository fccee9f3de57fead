//! # prognos-causal
//!
//! Builds and maintains the per-patient causal graph of disease progression.
//!
//! - **candidates**: next-diagnosis candidates from transition statistics
//! - **graph**: initial graph generation and diagnostic cycle reporting
//! - **fit**: co-occurrence log-likelihood per edge
//! - **refine**: evidence-driven weight boosting from document text
//! - **edits**: clinician add / remove / reverse
//! - **engine**: [`CausalGraphEngine`] tying the stores to the operations

pub mod candidates;
pub mod edits;
pub mod engine;
pub mod fit;
pub mod graph;
pub mod refine;

pub use candidates::build_candidate_set;
pub use edits::apply_edit;
pub use engine::CausalGraphEngine;
pub use fit::{edge_fit_score, fit_graph_with_data};
pub use graph::cycles::cycle_report;
pub use graph::generate_initial_dag;
pub use refine::iterative_refine;
pub use refine::lexicon::find_causal_phrase;
