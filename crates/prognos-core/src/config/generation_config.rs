use serde::{Deserialize, Serialize};

use super::defaults;

/// Text generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Provider name: "none" disables the model path, "ollama" enables it.
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_GENERATION_PROVIDER.to_string(),
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            base_url: defaults::DEFAULT_OLLAMA_BASE_URL.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
        }
    }
}
