//! Property-based tests for encode/decode round-trip

use proptest::prelude::*;
use wordtok_tokenizer::{Tokenizer, TokenizerError, Vocabulary, VocabularyBuilder};

const WORDS: &[&str] = &["alpha", "Beta", "gamma", "--", "_", "état", "42"];
const PUNCT: &[&str] = &[",", ".", ":", ";", "?", "!", "\"", "'", "(", ")"];

/// Words + punctuation + two reserved markers
const VOCAB_SIZE: u32 = 19;

fn corpus() -> String {
    let mut pieces: Vec<&str> = WORDS.to_vec();
    pieces.extend_from_slice(PUNCT);
    pieces.join(" ")
}

fn create_test_tokenizer() -> Tokenizer {
    Tokenizer::permissive(Vocabulary::from_corpus(&corpus())).expect("Failed to create test tokenizer")
}

/// A single in-vocabulary token
fn token() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        3 => prop::sample::select(WORDS.to_vec()),
        1 => prop::sample::select(PUNCT.to_vec()),
    ]
}

/// Render tokens the way decode does: single spaces, none before punctuation
fn render(tokens: &[&str]) -> String {
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && !PUNCT.contains(token) {
            text.push(' ');
        }
        text.push_str(token);
    }
    text
}

#[test]
fn test_vocab_size_constant() {
    assert_eq!(create_test_tokenizer().vocab_size(), VOCAB_SIZE as usize);
}

proptest! {
    #[test]
    fn test_encode_decode_roundtrip(tokens in prop::collection::vec(token(), 0..40)) {
        let tokenizer = create_test_tokenizer();
        let text = render(&tokens);

        let ids = tokenizer.encode(&text).unwrap();
        let decoded = tokenizer.decode(&ids).unwrap();

        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn test_encode_length_matches_split(text in "\\PC{0,200}") {
        let tokenizer = create_test_tokenizer();
        let ids = tokenizer.encode(&text).unwrap();
        prop_assert_eq!(ids.len(), wordtok_tokenizer::split::split_and_clean(&text).len());
    }

    #[test]
    fn test_permissive_never_fails(text in "\\p{Any}{0,200}") {
        let tokenizer = create_test_tokenizer();
        let ids = tokenizer.encode(&text).unwrap();
        prop_assert!(ids.iter().all(|&id| (id as usize) < tokenizer.vocab_size()));
    }

    #[test]
    fn test_unknown_words_map_to_unknown_id(word in "[xyz]{1,8}") {
        let tokenizer = create_test_tokenizer();
        let unk = tokenizer.unknown_id().unwrap();

        let ids = tokenizer.encode(&format!("alpha {word} gamma")).unwrap();
        prop_assert_eq!(ids.len(), 3);
        prop_assert_eq!(ids[1], unk);
        prop_assert_ne!(ids[0], unk);
        prop_assert_ne!(ids[2], unk);
    }

    #[test]
    fn test_strict_rejects_unknown_words(word in "[xyz]{1,8}") {
        let vocab = VocabularyBuilder::new().without_special_tokens().build(&corpus());
        let tokenizer = Tokenizer::strict(vocab);

        let result = tokenizer.encode(&format!("alpha {word}"));
        prop_assert_eq!(result, Err(TokenizerError::OutOfVocabulary(word)));
    }

    #[test]
    fn test_decode_never_fails_in_range(ids in prop::collection::vec(0u32..VOCAB_SIZE, 0..100)) {
        let tokenizer = create_test_tokenizer();
        prop_assert!(tokenizer.decode(&ids).is_ok());
    }

    #[test]
    fn test_decode_rejects_out_of_range(id in VOCAB_SIZE..50000) {
        let tokenizer = create_test_tokenizer();
        let result = tokenizer.decode(&[0, id]);
        let is_invalid_id = matches!(result, Err(TokenizerError::InvalidId { .. }));
        prop_assert!(is_invalid_id);
    }

    #[test]
    fn test_vocab_cardinality(text in "[a-c ,.]{0,60}") {
        let vocab = Vocabulary::from_corpus(&text);
        let distinct: std::collections::BTreeSet<String> =
            wordtok_tokenizer::split::split_and_clean(&text).into_iter().collect();

        prop_assert_eq!(vocab.size(), distinct.len() + 2);
        prop_assert_eq!(vocab.end_of_text_id(), Some(distinct.len() as u32));
        prop_assert_eq!(vocab.unknown_id(), Some(distinct.len() as u32 + 1));
    }
}
