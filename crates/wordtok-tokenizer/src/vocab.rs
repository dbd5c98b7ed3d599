//! Vocabulary construction and lookup

use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::special_tokens::SpecialTokens;
use crate::split::split_and_clean;

/// Errors that can occur during vocabulary operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("Token not found in vocabulary: {0}")]
    TokenNotFound(String),
    #[error("ID not found in vocabulary: {0}")]
    IdNotFound(u32),
    #[error("ID {id} is outside the contiguous range 0..{size}")]
    NonContiguousIds { id: u32, size: usize },
    #[error("ID {0} is assigned to more than one token")]
    DuplicateId(u32),
    #[error("Vocabulary contains an empty token")]
    EmptyToken,
    #[error("Token {0:?} does not survive the split rule as a single token")]
    UnsplittableToken(String),
    #[error("Special token {token:?} has ID {id}, expected {expected}")]
    MisplacedSpecialToken { token: String, id: u32, expected: u32 },
    #[error("Invalid special token: {0:?}")]
    InvalidSpecialToken(String),
}

/// Vocabulary mapping between tokens and IDs
///
/// Maintains bidirectional mappings:
/// - token -> ID (for encoding)
/// - ID -> token (for decoding)
///
/// IDs always cover `0..size()` with no gaps. A vocabulary is immutable once
/// built; share it between tokenizers through an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Mapping from token to ID
    token_to_id: HashMap<String, u32>,
    /// Mapping from ID to token, indexed by ID
    id_to_token: Vec<String>,
    /// Reserved markers present in this vocabulary, if any
    special_tokens: Option<SpecialTokens>,
}

impl Vocabulary {
    /// Build a vocabulary from a corpus using the default special tokens
    ///
    /// Shorthand for `VocabularyBuilder::new().build(corpus)`.
    pub fn from_corpus(corpus: &str) -> Self {
        VocabularyBuilder::new().build(corpus)
    }

    /// Build a vocabulary from an existing token -> ID mapping
    ///
    /// The IDs must form the contiguous range `0..map.len()` with no duplicates,
    /// and every token must split to exactly itself. When `special_tokens` is
    /// given, the end-of-text marker must hold ID `len - 2` and the unknown
    /// marker ID `len - 1`, as in a built vocabulary.
    ///
    /// # Errors
    /// Returns an error if an ID is out of range or repeated, a token is empty
    /// or would be split apart, or a requested special token is missing or not
    /// at its reserved ID.
    pub fn from_token_map(
        map: HashMap<String, u32>,
        special_tokens: Option<SpecialTokens>,
    ) -> Result<Self, VocabularyError> {
        let size = map.len();
        let mut slots: Vec<Option<String>> = vec![None; size];

        for (token, &id) in &map {
            if token.is_empty() {
                return Err(VocabularyError::EmptyToken);
            }
            if split_and_clean(token) != [token.as_str()] {
                return Err(VocabularyError::UnsplittableToken(token.clone()));
            }
            let slot = slots
                .get_mut(id as usize)
                .ok_or(VocabularyError::NonContiguousIds { id, size })?;
            if slot.is_some() {
                return Err(VocabularyError::DuplicateId(id));
            }
            *slot = Some(token.clone());
        }

        if let Some(special) = &special_tokens {
            for marker in special.all() {
                if !map.contains_key(marker) {
                    return Err(VocabularyError::TokenNotFound(marker.to_string()));
                }
            }
            // Both markers are present, so size >= 2
            let top = size as u32;
            for (marker, expected) in special.all().into_iter().zip([top - 2, top - 1]) {
                let id = map[marker];
                if id != expected {
                    return Err(VocabularyError::MisplacedSpecialToken {
                        token: marker.to_string(),
                        id,
                        expected,
                    });
                }
            }
        }

        // Every slot is filled: `size` distinct ids, all below `size`
        let id_to_token = slots.into_iter().flatten().collect();

        Ok(Self {
            token_to_id: map,
            id_to_token,
            special_tokens,
        })
    }

    /// Assign IDs to tokens in the given order
    fn from_ordered(tokens: Vec<String>, special_tokens: Option<SpecialTokens>) -> Self {
        let token_to_id = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| {
                let id = u32::try_from(id).expect("vocabulary exceeds the u32 id space");
                (token.clone(), id)
            })
            .collect();

        Self {
            token_to_id,
            id_to_token: tokens,
            special_tokens,
        }
    }

    /// Get the ID for a token
    ///
    /// Returns an error if the token is not in the vocabulary.
    pub fn token_to_id(&self, token: &str) -> Result<u32, VocabularyError> {
        self.token_to_id
            .get(token)
            .copied()
            .ok_or_else(|| VocabularyError::TokenNotFound(token.to_string()))
    }

    /// Get the token for an ID
    ///
    /// Returns an error if the ID is not in the vocabulary.
    pub fn id_to_token(&self, id: u32) -> Result<&str, VocabularyError> {
        self.id_to_token
            .get(id as usize)
            .map(|s| s.as_str())
            .ok_or(VocabularyError::IdNotFound(id))
    }

    /// Check if a token exists in the vocabulary
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Check if an ID exists in the vocabulary
    pub fn contains_id(&self, id: u32) -> bool {
        (id as usize) < self.id_to_token.len()
    }

    /// Get the size of the vocabulary
    pub fn size(&self) -> usize {
        self.id_to_token.len()
    }

    /// Check if the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Get all tokens in ID order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.id_to_token.iter().map(String::as_str)
    }

    /// Get the token -> ID mapping
    pub fn token_map(&self) -> &HashMap<String, u32> {
        &self.token_to_id
    }

    /// Reserved markers carried by this vocabulary
    pub fn special_tokens(&self) -> Option<&SpecialTokens> {
        self.special_tokens.as_ref()
    }

    /// ID of the unknown-token marker, if this vocabulary reserves one
    pub fn unknown_id(&self) -> Option<u32> {
        let special = self.special_tokens.as_ref()?;
        self.token_to_id.get(special.unknown()).copied()
    }

    /// ID of the end-of-text marker, if this vocabulary reserves one
    pub fn end_of_text_id(&self) -> Option<u32> {
        let special = self.special_tokens.as_ref()?;
        self.token_to_id.get(special.end_of_text()).copied()
    }
}

/// Builds a [`Vocabulary`] from raw text
///
/// Corpus text is split with [`split_and_clean`], deduplicated, and sorted by
/// code point. The end-of-text and unknown markers are then appended, so they
/// always receive the two highest IDs.
///
/// If the corpus itself contains a marker string, that token is not given a
/// separate ID: it is folded into the reserved entry at the top of the range.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    special_tokens: Option<SpecialTokens>,
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyBuilder {
    /// Create a builder that appends the default special tokens
    pub fn new() -> Self {
        Self {
            special_tokens: Some(SpecialTokens::default()),
        }
    }

    /// Use custom marker strings
    pub fn with_special_tokens(mut self, special_tokens: SpecialTokens) -> Self {
        self.special_tokens = Some(special_tokens);
        self
    }

    /// Build vocabularies that contain corpus tokens only
    ///
    /// Such a vocabulary has no unknown marker, so only a strict tokenizer can
    /// be built on top of it.
    pub fn without_special_tokens(mut self) -> Self {
        self.special_tokens = None;
        self
    }

    /// Build a vocabulary from a single corpus string
    pub fn build(&self, corpus: &str) -> Vocabulary {
        self.build_from_iterator(std::iter::once(corpus))
    }

    /// Build a vocabulary from several documents
    ///
    /// Each document is split on its own; the vocabulary covers the union of
    /// their tokens.
    pub fn build_from_iterator<I, S>(&self, documents: I) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique = BTreeSet::new();
        let mut num_chars = 0usize;
        let mut num_tokens = 0usize;

        for document in documents {
            let document = document.as_ref();
            num_chars += document.chars().count();

            let tokens = split_and_clean(document);
            num_tokens += tokens.len();
            unique.extend(tokens);
        }

        if let Some(special) = &self.special_tokens {
            for marker in special.all() {
                if unique.remove(marker) {
                    tracing::warn!(
                        marker,
                        "corpus contains a reserved marker; it keeps its reserved id"
                    );
                }
            }
        }

        let mut ordered: Vec<String> = unique.into_iter().collect();
        if let Some(special) = &self.special_tokens {
            ordered.extend(special.all().iter().map(|s| s.to_string()));
        }

        tracing::debug!(
            num_chars,
            num_tokens,
            vocab_size = ordered.len(),
            "built vocabulary"
        );

        Vocabulary::from_ordered(ordered, self.special_tokens.clone())
    }
}
