//! Ollama text generator over HTTP (`/api/generate`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use prognos_core::config::GenerationConfig;
use prognos_core::errors::{GenerationError, PrognosResult};
use prognos_core::traits::ITextGenerator;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Non-streaming completions from a local Ollama server.
/// Unavailable until a health check passes.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    temperature: f32,
    available: AtomicBool,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
            available: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.base_url.clone(), config.model.clone(), config.temperature)
    }

    fn runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
    }

    /// Check if the Ollama server is reachable and mark the generator accordingly.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let Ok(rt) = Self::runtime() else {
            return false;
        };

        let result = rt.block_on(async {
            reqwest::Client::new()
                .get(&url)
                .timeout(HEALTH_CHECK_TIMEOUT)
                .send()
                .await
        });

        let ok = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(ok, Ordering::Relaxed);
        ok
    }
}

impl ITextGenerator for OllamaGenerator {
    fn generate(&self, prompt: &str, max_tokens: u32, timeout: Duration) -> PrognosResult<String> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(GenerationError::Unavailable {
                provider: self.name().to_string(),
            }
            .into());
        }

        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature: self.temperature,
            },
        };
        let rt = Self::runtime().map_err(|e| GenerationError::RequestFailed {
            reason: format!("runtime error: {e}"),
        })?;

        let result: Result<GenerateResponse, GenerationError> = rt.block_on(async {
            let resp = reqwest::Client::new()
                .post(&url)
                .timeout(timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        GenerationError::Timeout {
                            timeout_ms: timeout.as_millis() as u64,
                        }
                    } else {
                        GenerationError::RequestFailed {
                            reason: format!("Ollama HTTP error: {e}"),
                        }
                    }
                })?;
            if !resp.status().is_success() {
                return Err(GenerationError::RequestFailed {
                    reason: format!("Ollama returned {}", resp.status()),
                });
            }
            resp.json::<GenerateResponse>()
                .await
                .map_err(|e| GenerationError::RequestFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })
        });
        Ok(result?.response)
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

/// The configured generator, or `None` when generation is disabled or the
/// server does not answer its health check.
pub fn create_generator(config: &GenerationConfig) -> Option<Arc<dyn ITextGenerator>> {
    match config.provider.as_str() {
        "ollama" => {
            let generator = OllamaGenerator::from_config(config);
            if generator.health_check() {
                info!(model = %config.model, "using Ollama generator");
                Some(Arc::new(generator))
            } else {
                warn!(
                    base_url = %config.base_url,
                    "Ollama generator unavailable, ranking will be deterministic"
                );
                None
            }
        }
        "none" | "" => None,
        other => {
            warn!(provider = other, "unknown generation provider, ranking will be deterministic");
            None
        }
    }
}
