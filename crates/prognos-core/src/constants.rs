//! Fixed vocabularies and sentinel values shared across crates.

/// Phrases that mark a document as describing a causal or progression link.
/// Matched as lower-case substrings in this order; the first hit wins.
pub const CAUSAL_LEXICON: &[&str] = &[
    "cause",
    "causes",
    "caused by",
    "risk factor",
    "risk factors",
    "leads to",
    "lead to",
    "associated with",
    "association with",
    "progression to",
    "progresses to",
    "results in",
    "result in",
];

/// Organ-system keywords that make a clinician comment boost every candidate.
pub const CLINICIAN_BOOST_KEYWORDS: &[&str] = &["kidney", "heart", "diabetes", "hypertension"];

/// Explanation returned when no candidate could be generated.
pub const NO_CANDIDATES_EXPLANATION: &str = "No candidate diseases identified.";

/// Disease code persisted when a prediction carries no ranked candidate.
pub const UNKNOWN_DISEASE_CODE: &str = "UNKNOWN";

/// Weight given to candidates derived from graph nodes without an edge.
pub const NODE_ONLY_CANDIDATE_SCORE: f64 = 0.5;

/// Fit score of an edge whose co-occurrence record exists but is empty.
pub const FIT_SCORE_EMPTY: f64 = -10.0;

/// Fit score of an edge without any co-occurrence record.
pub const FIT_SCORE_MISSING: f64 = -5.0;

/// Section label prefix for ingested document chunks.
pub const INGESTED_SECTION_PREFIX: &str = "uploaded_chunk";
