//! Embedding providers and provider selection.

mod hashed_tfidf;
mod ollama;

use std::sync::Arc;

use tracing::{info, warn};

use prognos_core::config::EmbeddingConfig;
use prognos_core::traits::IEmbeddingProvider;

pub use hashed_tfidf::HashedTfIdf;
pub use ollama::OllamaEmbedder;

/// Build the configured provider. An unreachable or unknown provider
/// degrades to [`HashedTfIdf`], which is always available.
pub fn create_provider(config: &EmbeddingConfig) -> Arc<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "ollama" => {
            let provider = OllamaEmbedder::from_config(config);
            if provider.health_check() {
                info!(model = %config.model, "using Ollama embeddings");
                return Arc::new(provider);
            }
            warn!(
                model = %config.model,
                "Ollama embeddings unavailable, degrading to hashed TF-IDF"
            );
        }
        "tfidf" => {}
        other => warn!(provider = other, "unknown embedding provider, using hashed TF-IDF"),
    }
    Arc::new(HashedTfIdf::new(config.dimensions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_tfidf() {
        let provider = create_provider(&EmbeddingConfig::default());
        assert_eq!(provider.name(), "hashed-tfidf");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn unknown_provider_degrades() {
        let config = EmbeddingConfig {
            provider: "word2vec".into(),
            dimensions: 64,
            ..EmbeddingConfig::default()
        };
        assert_eq!(create_provider(&config).dimensions(), 64);
    }
}
