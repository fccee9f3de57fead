//! Extractive summaries: the leading sentences that fit a character budget.

/// Return `content` unchanged when it fits in `max_chars` characters.
/// Otherwise cut the first `max_chars` characters after the last `.`, `!` or
/// `?` that is not the very first character; with no such terminator, trim
/// trailing whitespace and append `...`.
pub fn extractive_summary(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let window: String = content.chars().take(max_chars).collect();
    let cut = window
        .char_indices()
        .filter(|(i, c)| *i > 0 && matches!(c, '.' | '!' | '?'))
        .map(|(i, c)| i + c.len_utf8())
        .last();

    match cut {
        Some(end) => window[..end].to_string(),
        None => format!("{}...", window.trim_end()),
    }
}
