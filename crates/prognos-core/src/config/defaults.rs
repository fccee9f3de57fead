// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "prognos.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_024;

// --- Ollama ---
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 200;
pub const DEFAULT_HISTORY_WINDOW: usize = 3;
pub const DEFAULT_CANDIDATE_WINDOW: usize = 5;
pub const DEFAULT_SUMMARY_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_SUMMARY_CACHE_TTL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_CHUNK_MAX_WORDS: usize = 600;

// --- Causal ---
pub const DEFAULT_CANDIDATE_EPSILON: f64 = 0.01;
pub const DEFAULT_MAX_REFINE_ITERATIONS: usize = 3;
pub const DEFAULT_BOOST_FACTOR: f64 = 1.2;
pub const DEFAULT_CLINICIAN_EDGE_WEIGHT: f64 = 0.8;
pub const DEFAULT_DAG_CANDIDATE_LIMIT: usize = 10;

// --- Ranking ---
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_TRANSITION_WEIGHT: f64 = 0.6;
pub const DEFAULT_DOCUMENT_WEIGHT: f64 = 0.3;
pub const DEFAULT_CLINICIAN_WEIGHT: f64 = 0.1;
pub const DEFAULT_CLINICIAN_BOOST: f64 = 0.2;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_EXPLANATION_MAX_CHARS: usize = 800;
pub const DEFAULT_EVIDENCE_LIMIT: usize = 5;
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 150;

// --- Generation ---
pub const DEFAULT_GENERATION_PROVIDER: &str = "none";
pub const DEFAULT_GENERATION_MODEL: &str = "llama3.2";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
