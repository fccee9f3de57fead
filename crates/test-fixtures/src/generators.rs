//! Text generators with scripted behaviour.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use prognos_core::errors::{GenerationError, PrognosResult};
use prognos_core::traits::ITextGenerator;

/// Returns the same text for every prompt and records the prompts.
#[derive(Debug)]
pub struct ScriptedGenerator {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str, _max_tokens: u32, _timeout: Duration) -> PrognosResult<String> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Fails every call.
#[derive(Debug, Default)]
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ITextGenerator for FailingGenerator {
    fn generate(&self, _prompt: &str, _max_tokens: u32, _timeout: Duration) -> PrognosResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::RequestFailed {
            reason: "model offline".to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Sleeps before answering, ignoring the timeout it is given.
#[derive(Debug)]
pub struct SlowGenerator {
    delay: Duration,
    response: String,
}

impl SlowGenerator {
    pub fn new(delay: Duration, response: impl Into<String>) -> Self {
        Self {
            delay,
            response: response.into(),
        }
    }
}

impl ITextGenerator for SlowGenerator {
    fn generate(&self, _prompt: &str, _max_tokens: u32, _timeout: Duration) -> PrognosResult<String> {
        std::thread::sleep(self.delay);
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "slow"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Sleeps inside `generate` and tracks how many calls overlap.
#[derive(Debug)]
pub struct TrackingGenerator {
    delay: Duration,
    response: String,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl TrackingGenerator {
    pub fn new(delay: Duration, response: impl Into<String>) -> Self {
        Self {
            delay,
            response: response.into(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Highest number of simultaneous `generate` calls seen.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ITextGenerator for TrackingGenerator {
    fn generate(&self, _prompt: &str, _max_tokens: u32, _timeout: Duration) -> PrognosResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "tracking"
    }

    fn is_available(&self) -> bool {
        true
    }
}
