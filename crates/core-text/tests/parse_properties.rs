//! Property-based tests for the tokenizer / sentence grouping.

use core_text::parse::{parse, tokenize};
use proptest::prelude::*;

// Alphabet biased towards separators and terminals so sentence edges are common.
fn prose() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => proptest::char::range('a', 'e'),
            2 => Just(' '),
            1 => Just('.'),
            1 => Just('?'),
            1 => Just('!'),
            1 => Just('\n'),
            1 => Just(','),
            1 => Just('é'),
            1 => Just('—'),
        ],
        0..80,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    // Tokens concatenate back to the input with contiguous offsets.
    #[test]
    fn tokens_partition_text(text in prose()) {
        let tokens = tokenize(&text);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(&joined, &text);
        let mut expected_start = 0usize;
        for t in &tokens {
            prop_assert_eq!(t.start, expected_start);
            prop_assert!(t.end > t.start);
            prop_assert_eq!(t.end - t.start, t.text.chars().count());
            expected_start = t.end;
        }
        prop_assert_eq!(expected_start, text.chars().count());
    }

    // Sentence token lists concatenate to exactly the tokenizer output.
    #[test]
    fn sentences_cover_all_tokens(text in prose()) {
        let doc = parse(&text);
        let from_sentences: Vec<_> = doc.tokens().cloned().collect();
        prop_assert_eq!(from_sentences, tokenize(&text));
        for (i, s) in doc.sentences.iter().enumerate() {
            prop_assert_eq!(s.index, i);
            prop_assert!(s.start <= s.end);
            prop_assert!(s.end <= s.tokens_end());
        }
        for pair in doc.sentences.windows(2) {
            prop_assert_eq!(pair[0].tokens_end(), pair[1].start);
        }
    }

    // Reparsing identical text yields an identical document.
    #[test]
    fn reparse_is_idempotent(text in prose()) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    // Words are exactly the word tokens, in order.
    #[test]
    fn words_are_word_tokens(text in prose()) {
        let doc = parse(&text);
        let words: Vec<_> = tokenize(&text).into_iter().filter(|t| t.is_word()).collect();
        prop_assert_eq!(doc.words, words);
    }
}
