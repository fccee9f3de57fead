//! Test support shared across crates: in-memory implementations of every
//! collaborator trait, scripted text generators, and JSON scenario fixtures.

pub mod embedders;
pub mod generators;
pub mod scenario;
pub mod stores;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub use embedders::KeywordEmbedder;
pub use generators::{FailingGenerator, ScriptedGenerator, SlowGenerator, TrackingGenerator};
pub use scenario::ClinicalScenario;
pub use stores::{
    InMemoryCoOccurrence, InMemoryDocuments, InMemoryHistory, InMemoryPredictionStore,
    InMemoryTransitions,
};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_fixtures_exist() {
        assert!(fixture_exists("scenarios/ckd_progression.json"));
    }

    #[test]
    fn ckd_scenario_parses() {
        let s: ClinicalScenario = load_fixture("scenarios/ckd_progression.json");
        assert!(!s.transitions.is_empty());
        assert!(!s.documents.is_empty());
        assert!(!s.visits.is_empty());
    }
}
