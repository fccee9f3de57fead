/// Text generation errors. The ranking engine converts every one of these
/// into the deterministic fallback; they never reach pipeline callers.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generator unavailable: {provider}")]
    Unavailable { provider: String },

    #[error("generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("generation request failed: {reason}")]
    RequestFailed { reason: String },
}
