//! Causal-phrase lexicon matching.

use prognos_core::constants::CAUSAL_LEXICON;

/// First lexicon phrase contained in `text`, compared lower-case.
pub fn find_causal_phrase(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    CAUSAL_LEXICON
        .iter()
        .copied()
        .find(|phrase| lowered.contains(phrase))
}
