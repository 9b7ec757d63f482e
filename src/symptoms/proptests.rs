//! Property-based tests for symptom normalization

use super::normalize;
use proptest::prelude::*;

proptest! {
    #[test]
    fn tokens_are_trimmed_nonempty_and_separator_free(raw in "[a-zA-Z ,;\t]{0,60}") {
        for token in normalize(&raw) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.trim(), token.as_str());
            prop_assert!(!token.contains(',') && !token.contains(';'));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }

    #[test]
    fn separator_and_whitespace_input_is_empty(raw in "[ ,;\t\n]{0,40}") {
        prop_assert!(normalize(&raw).is_empty());
    }

    #[test]
    fn normalizing_joined_tokens_is_stable(raw in "[a-zA-Z ,;]{0,60}") {
        let once = normalize(&raw);
        let twice = normalize(&once.join(", "));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn token_count_never_exceeds_piece_count(raw in "[a-z ,;]{0,60}") {
        let pieces = raw.split([',', ';']).count();
        prop_assert!(normalize(&raw).len() <= pieces);
    }
}
