//! Recovery of a JSON object from free-form model output.
//!
//! Strategies run in order and the first one yielding an object with both
//! `predictions` and `explanation` wins. Malformed output is never an error:
//! the cascade returns `None` and the caller falls back.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

static FLAT_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").ok());
static OUTER_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").ok());
static TRAILING_COMMA_OBJECT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r",\s*\}").ok());
static TRAILING_COMMA_ARRAY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r",\s*\]").ok());

const REQUIRED_KEYS: &[&str] = &["predictions", "explanation"];

/// Result of one parse strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Value),
    Rejected,
}

type Strategy = fn(&str) -> ParseOutcome;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct", direct),
    ("flat_block", flat_block),
    ("outer_block", outer_block),
    ("cleaned", cleaned),
];

/// Run the cascade over `raw`.
pub fn parse_model_output(raw: &str) -> Option<Value> {
    for (name, strategy) in STRATEGIES {
        if let ParseOutcome::Parsed(value) = strategy(raw) {
            debug!(strategy = name, "recovered model output");
            return Some(value);
        }
    }
    debug!(len = raw.len(), "model output not recoverable");
    None
}

fn validated(text: &str) -> ParseOutcome {
    match serde_json::from_str::<Value>(text) {
        Ok(value) if has_required_keys(&value) => ParseOutcome::Parsed(value),
        _ => ParseOutcome::Rejected,
    }
}

fn has_required_keys(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| REQUIRED_KEYS.iter().all(|k| obj.contains_key(*k)))
}

fn first_match<'t>(re: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    re.as_ref()?.find(text).map(|m| m.as_str())
}

/// The raw text as JSON.
pub fn direct(text: &str) -> ParseOutcome {
    validated(text)
}

/// The first `{...}` block without nested braces.
pub fn flat_block(text: &str) -> ParseOutcome {
    first_match(&FLAT_BLOCK, text).map_or(ParseOutcome::Rejected, validated)
}

/// From the first `{` to the last `}`.
pub fn outer_block(text: &str) -> ParseOutcome {
    first_match(&OUTER_BLOCK, text).map_or(ParseOutcome::Rejected, validated)
}

/// Direct and outer-block parsing of the cleaned text, only when cleanup
/// changed something.
pub fn cleaned(text: &str) -> ParseOutcome {
    let cleaned = clean_invalid_tokens(text);
    if cleaned == text {
        return ParseOutcome::Rejected;
    }
    match direct(&cleaned) {
        ParseOutcome::Rejected => outer_block(&cleaned),
        parsed => parsed,
    }
}

/// Strip trailing commas before `}` or `]`, turn single quotes into double
/// quotes, and drop control characters other than tab, newline, and CR.
pub fn clean_invalid_tokens(text: &str) -> String {
    let mut out = text.to_string();
    if let Some(re) = TRAILING_COMMA_OBJECT.as_ref() {
        out = re.replace_all(&out, "}").into_owned();
    }
    if let Some(re) = TRAILING_COMMA_ARRAY.as_ref() {
        out = re.replace_all(&out, "]").into_owned();
    }
    out.replace('\'', "\"")
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_json_parses() {
        let raw = r#"{"predictions": [], "explanation": "ok"}"#;
        assert_eq!(direct(raw), ParseOutcome::Parsed(serde_json::json!({"predictions": [], "explanation": "ok"})));
    }

    #[test]
    fn missing_key_is_rejected() {
        assert_eq!(direct(r#"{"predictions": []}"#), ParseOutcome::Rejected);
        assert_eq!(direct("[1, 2]"), ParseOutcome::Rejected);
    }

    #[test]
    fn flat_block_inside_prose() {
        let raw = r#"Sure! {"predictions": "N18.4", "explanation": "ok"} Hope that helps."#;
        assert!(matches!(flat_block(raw), ParseOutcome::Parsed(_)));
    }

    #[test]
    fn nested_block_needs_outer_strategy() {
        let raw = r#"Answer: {"predictions": [{"code": "N18.4"}], "explanation": "ok"} end"#;
        assert_eq!(flat_block(raw), ParseOutcome::Rejected);
        assert!(matches!(outer_block(raw), ParseOutcome::Parsed(_)));
    }

    #[test]
    fn single_quotes_and_trailing_comma_recovered_by_cleanup() {
        let raw = "{'predictions': [], 'explanation': 'ok',}";
        let value = parse_model_output(raw).unwrap();
        assert_eq!(value["explanation"], "ok");
    }

    #[test]
    fn control_characters_are_stripped() {
        assert_eq!(clean_invalid_tokens("a\u{0001}b\tc\n"), "ab\tc\n");
    }

    #[test]
    fn text_without_braces_has_no_result() {
        assert_eq!(parse_model_output("I cannot answer that."), None);
    }

    #[test]
    fn unchanged_cleanup_is_rejected() {
        assert_eq!(cleaned(r#"{"a": 1}"#), ParseOutcome::Rejected);
    }
}
