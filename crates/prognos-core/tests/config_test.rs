use prognos_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = PrognosConfig::from_toml("").unwrap();

    // Storage defaults
    assert_eq!(config.storage.db_path, "prognos.db");
    assert_eq!(config.storage.busy_timeout_ms, 5_000);

    // Embedding defaults
    assert_eq!(config.embedding.provider, "tfidf");
    assert_eq!(config.embedding.dimensions, 384);

    // Retrieval defaults
    assert_eq!(config.retrieval.top_k, 10);
    assert_eq!(config.retrieval.summary_max_chars, 200);
    assert_eq!(config.retrieval.history_window, 3);
    assert_eq!(config.retrieval.candidate_window, 5);
    assert_eq!(config.retrieval.chunk_max_words, 600);

    // Causal defaults
    assert_eq!(config.causal.epsilon, 0.01);
    assert_eq!(config.causal.max_refine_iterations, 3);
    assert_eq!(config.causal.boost_factor, 1.2);
    assert_eq!(config.causal.clinician_edge_weight, 0.8);

    // Ranking defaults
    assert_eq!(config.ranking.max_tokens, 300);
    assert_eq!(config.ranking.transition_weight, 0.6);
    assert_eq!(config.ranking.document_weight, 0.3);
    assert_eq!(config.ranking.clinician_weight, 0.1);
    assert_eq!(config.ranking.top_n, 10);
    assert_eq!(config.ranking.explanation_max_chars, 800);
    assert_eq!(
        config.ranking.boost_keywords,
        vec!["kidney", "heart", "diabetes", "hypertension"]
    );

    // Generation defaults
    assert_eq!(config.generation.provider, "none");

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[storage]
db_path = "/var/lib/prognos/clinic.db"

[ranking]
generation_timeout_ms = 1500

[generation]
provider = "ollama"
model = "mistral"
"#;
    let config = PrognosConfig::from_toml(toml).unwrap();
    assert_eq!(config.storage.db_path, "/var/lib/prognos/clinic.db");
    assert_eq!(config.storage.busy_timeout_ms, 5_000);
    assert_eq!(config.ranking.generation_timeout_ms, 1500);
    assert_eq!(config.ranking.max_tokens, 300);
    assert_eq!(config.generation.provider, "ollama");
    assert_eq!(config.generation.model, "mistral");
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = PrognosConfig::from_toml("[causal\nepsilon = ").unwrap_err();
    assert!(matches!(err, prognos_core::PrognosError::ConfigError(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = PrognosConfig::from_file(std::path::Path::new("/nonexistent/prognos.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/prognos.toml"));
}
