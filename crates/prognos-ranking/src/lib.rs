//! # prognos-ranking
//!
//! Turns candidates, the causal graph, and document summaries into a ranked,
//! explained [`Prediction`](prognos_core::Prediction).
//!
//! The model path prompts a text generator under a hard deadline and
//! recovers JSON from its output through an ordered cascade of parse
//! strategies. Any generation failure, timeout, or unparseable output falls
//! through to the deterministic weighted scorer.

pub mod engine;
pub mod fallback;
pub mod model_output;
pub mod ollama;
pub mod parse;
pub mod prompt;
mod text;

pub use engine::RankingEngine;
pub use fallback::deterministic_fallback;
pub use ollama::{create_generator, OllamaGenerator};
pub use parse::{parse_model_output, ParseOutcome};
pub use prompt::build_prompt;
