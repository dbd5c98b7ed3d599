//! Unit tests for encoding and decoding

use wordtok_tokenizer::{Tokenizer, TokenizerError, Vocabulary, VocabularyBuilder};

#[test]
fn test_hello_world_scenario() {
    let tokenizer = create_test_tokenizer("Hello, world.");
    assert_eq!(tokenizer.vocab_size(), 6);

    let ids = tokenizer.encode("Hello, world.").unwrap();
    assert_eq!(ids, vec![2, 0, 3, 1]);

    let decoded = tokenizer.decode(&ids).unwrap();
    assert_eq!(decoded, "Hello, world.");
}

#[test]
fn test_unknown_token_substituted() {
    let tokenizer = create_test_tokenizer("Hello, world.");
    let unk = tokenizer.unknown_id().expect("permissive vocab has an unknown marker");
    assert_eq!(unk, 5);

    let ids = tokenizer.encode("Hello, Mars.").unwrap();
    assert_eq!(ids, vec![2, 0, unk, 1]);
    assert_eq!(tokenizer.decode(&ids).unwrap(), "Hello, <|unk|>.");
}

#[test]
fn test_strict_rejects_unknown_token() {
    let vocab = VocabularyBuilder::new()
        .without_special_tokens()
        .build("Hello, world.");
    let tokenizer = Tokenizer::strict(vocab);

    assert_eq!(tokenizer.vocab_size(), 4);
    assert_eq!(
        tokenizer.encode("Hello, Mars."),
        Err(TokenizerError::OutOfVocabulary("Mars".to_string()))
    );
    assert!(tokenizer.encode("world, Hello.").is_ok());
}

#[test]
fn test_encode_empty_string() {
    let tokenizer = create_test_tokenizer("hello world");
    assert!(tokenizer.encode("").unwrap().is_empty());
    assert!(tokenizer.encode(" \n\t").unwrap().is_empty());
}

#[test]
fn test_decode_empty_ids() {
    let tokenizer = create_test_tokenizer("hello world");
    let ids = vec![];

    let decoded = tokenizer.decode(&ids).unwrap();
    assert_eq!(decoded, "");
}

#[test]
fn test_decode_invalid_id_propagates() {
    let tokenizer = create_test_tokenizer("hello world");
    let size = tokenizer.vocab_size() as u32;

    assert_eq!(
        tokenizer.decode(&[0, size, 1]),
        Err(TokenizerError::InvalidId {
            id: size,
            vocab_size: size as usize
        })
    );
    assert!(tokenizer.decode(&[u32::MAX]).is_err());
}

#[test]
fn test_encode_preserves_order_and_length() {
    let tokenizer = create_test_tokenizer("the quick brown fox jumps");
    let text = "fox the  quick\njumps   brown fox";

    let ids = tokenizer.encode(text).unwrap();
    assert_eq!(ids.len(), 6);

    let tokens: Vec<&str> = ids
        .iter()
        .map(|&id| tokenizer.id_to_token(id).unwrap())
        .collect();
    assert_eq!(tokens, vec!["fox", "the", "quick", "jumps", "brown", "fox"]);
}

#[test]
fn test_decode_normalizes_whitespace() {
    let tokenizer = create_test_tokenizer("It was late. Was it?");
    let ids = tokenizer.encode("It   was\nlate .").unwrap();
    assert_eq!(tokenizer.decode(&ids).unwrap(), "It was late.");
}

#[test]
fn test_encode_multiple_texts() {
    let tokenizer = create_test_tokenizer("hello world rust");
    let texts = vec!["hello", "world", "rust"];

    let all_ids = tokenizer.encode_batch(&texts).unwrap();
    assert_eq!(all_ids.len(), texts.len());

    let decoded = tokenizer.decode_batch(&all_ids).unwrap();
    assert_eq!(decoded, vec!["hello", "world", "rust"]);
}

#[test]
fn test_encode_batch_strict_fails_on_any_unknown() {
    let tokenizer = Tokenizer::strict(Vocabulary::from_corpus("a b"));
    assert!(tokenizer.encode_batch(&["a", "b c"]).is_err());
}

#[test]
fn test_every_token_decodes_to_itself() {
    let corpus = "In the beginning -- so they say -- there was (only) text: \"words\", and more words!";
    let tokenizer = create_test_tokenizer(corpus);

    for id in 0..tokenizer.vocab_size() as u32 {
        let token = tokenizer.id_to_token(id).unwrap();
        assert_eq!(tokenizer.token_to_id(token), Some(id));
        assert_eq!(tokenizer.decode(&[id]).unwrap(), token);
    }
}

// Helper function to create a permissive tokenizer over `corpus`
fn create_test_tokenizer(corpus: &str) -> Tokenizer {
    Tokenizer::permissive(Vocabulary::from_corpus(corpus)).expect("Failed to create test tokenizer")
}
