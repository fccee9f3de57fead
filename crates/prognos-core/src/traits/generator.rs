use std::time::Duration;

use crate::errors::PrognosResult;

/// Prompt-in, text-out generative model.
pub trait ITextGenerator: Send + Sync {
    /// Generate at most `max_tokens` tokens. Implementations should give up
    /// once `timeout` has elapsed; callers enforce it regardless.
    fn generate(&self, prompt: &str, max_tokens: u32, timeout: Duration) -> PrognosResult<String>;

    /// Human-readable generator name.
    fn name(&self) -> &str;

    /// Whether the generator is currently reachable.
    fn is_available(&self) -> bool;
}
