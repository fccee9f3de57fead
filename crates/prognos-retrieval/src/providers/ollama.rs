//! Ollama embedding provider over HTTP (`/api/embed`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use prognos_core::config::EmbeddingConfig;
use prognos_core::errors::{EmbeddingError, PrognosResult};
use prognos_core::traits::IEmbeddingProvider;

/// Embeddings from a local Ollama server. Unavailable until a health check passes.
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbedder {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, dimensions: usize, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
            timeout,
            available: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            config.dimensions,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
    }

    /// Check if the Ollama server is reachable and mark the provider accordingly.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let Ok(rt) = Self::runtime() else {
            return false;
        };

        let result = rt.block_on(async {
            reqwest::Client::new()
                .get(&url)
                .timeout(Duration::from_secs(5))
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

    fn request(&self, texts: &[String]) -> PrognosResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let body = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        let rt = Self::runtime().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("runtime error: {e}"),
        })?;

        let result: Result<EmbedResponse, EmbeddingError> = rt.block_on(async {
            let resp = reqwest::Client::new()
                .post(&url)
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama HTTP error: {e}"),
                })?;
            if !resp.status().is_success() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("Ollama returned {}", resp.status()),
                });
            }
            resp.json::<EmbedResponse>()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })
        });
        let response = result?;

        if response.embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    response.embeddings.len()
                ),
            }
            .into());
        }

        // Pad or truncate to the configured dimensionality.
        let dims = self.dimensions;
        Ok(response
            .embeddings
            .into_iter()
            .map(|mut v| {
                v.resize(dims, 0.0);
                v
            })
            .collect())
    }
}

impl IEmbeddingProvider for OllamaEmbedder {
    fn embed(&self, text: &str) -> PrognosResult<Vec<f32>> {
        let mut out = self.request(&[text.to_string()])?;
        out.pop().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> PrognosResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
