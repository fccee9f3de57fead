use proptest::prelude::*;

use prognos_retrieval::{cosine_similarity, extractive_summary};

proptest! {
    #[test]
    fn cosine_is_bounded(
        a in prop::collection::vec(-10.0f32..10.0, 1..16),
        b in prop::collection::vec(-10.0f32..10.0, 1..16),
    ) {
        let s = cosine_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn cosine_is_symmetric(
        pair in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0), 1..16)
    ) {
        let (a, b): (Vec<f32>, Vec<f32>) = pair.into_iter().unzip();
        prop_assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn summary_respects_budget(text in "[a-zA-Z .!?]{0,400}", max in 1usize..250) {
        let s = extractive_summary(&text, max);
        // The ellipsis is the only text added beyond the budget.
        prop_assert!(s.chars().count() <= max + 3);
        let body = s.strip_suffix("...").unwrap_or(&s);
        prop_assert!(text.starts_with(body));
    }

    #[test]
    fn short_text_is_verbatim(text in "[a-z .]{0,50}") {
        prop_assert_eq!(extractive_summary(&text, 50), text);
    }
}
