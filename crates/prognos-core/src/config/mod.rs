//! Configuration. Every section falls back to `defaults.rs` for missing keys.

mod causal_config;
pub mod defaults;
mod embedding_config;
mod generation_config;
mod observability_config;
mod ranking_config;
mod retrieval_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use causal_config::CausalConfig;
pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use crate::errors::{PrognosError, PrognosResult};

/// Top-level configuration aggregating every subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrognosConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub causal: CausalConfig,
    pub ranking: RankingConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

impl PrognosConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(toml_str: &str) -> PrognosResult<Self> {
        toml::from_str(toml_str).map_err(|e| PrognosError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> PrognosResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PrognosError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }
}
