//! Word-level tokenizer with a closed vocabulary
//!
//! This crate provides:
//! - A rule-based split of text into words and punctuation
//! - Vocabulary construction from a corpus
//! - Token encoding and decoding
//! - Special token handling (end-of-text and unknown markers)
//!
//! # Example
//!
//! ```
//! use wordtok_tokenizer::{Tokenizer, Vocabulary};
//!
//! let vocab = Vocabulary::from_corpus("Hello, world.");
//! let tokenizer = Tokenizer::permissive(vocab).expect("vocabulary has an unknown marker");
//!
//! let ids = tokenizer.encode("Hello, world.").unwrap();
//! assert_eq!(ids.len(), 4);
//!
//! let text = tokenizer.decode(&ids).unwrap();
//! assert_eq!(text, "Hello, world.");
//! ```

pub mod config;
pub mod error;
pub mod special_tokens;
pub mod split;
pub mod vocab;

pub use config::TokenizerConfig;
pub use error::TokenizerError;
pub use special_tokens::SpecialTokens;
pub use vocab::{Vocabulary, VocabularyBuilder, VocabularyError};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

use crate::split::split_and_clean;

/// Whitespace before punctuation, removed when decoding
const PUNCT_SPACING_PATTERN: &str = r#"\s+([,.:;?!"()'])"#;

static PUNCT_SPACING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PUNCT_SPACING_PATTERN).expect("punctuation spacing pattern is a valid regex")
});

/// What encode does with a token missing from the vocabulary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTokenPolicy {
    /// Fail with [`TokenizerError::OutOfVocabulary`]
    Strict,
    /// Replace the token with the unknown marker
    ///
    /// Lossy: the original token cannot be recovered by decode.
    #[default]
    Substitute,
}

/// Main tokenizer interface
///
/// Wraps an immutable [`Vocabulary`] and an [`UnknownTokenPolicy`]. Encoding
/// and decoding keep no state between calls, and the vocabulary is shared
/// through an `Arc`, so a tokenizer can be cloned cheaply and used from many
/// threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    vocab: Arc<Vocabulary>,
    policy: UnknownTokenPolicy,
    /// Cached ID of the unknown marker
    unknown_id: Option<u32>,
}

impl Tokenizer {
    /// Create a tokenizer over a vocabulary
    ///
    /// # Arguments
    /// * `vocab` - Vocabulary, owned or already shared
    /// * `policy` - Out-of-vocabulary handling
    ///
    /// # Errors
    /// Returns [`TokenizerError::MissingUnknownToken`] when `policy` is
    /// [`UnknownTokenPolicy::Substitute`] and the vocabulary has no unknown
    /// marker.
    pub fn new(
        vocab: impl Into<Arc<Vocabulary>>,
        policy: UnknownTokenPolicy,
    ) -> Result<Self, TokenizerError> {
        let vocab = vocab.into();
        if policy == UnknownTokenPolicy::Substitute && vocab.unknown_id().is_none() {
            return Err(TokenizerError::MissingUnknownToken);
        }
        Ok(Self::with_policy(vocab, policy))
    }

    /// Assemble a tokenizer whose policy is already known to fit `vocab`
    fn with_policy(vocab: Arc<Vocabulary>, policy: UnknownTokenPolicy) -> Self {
        let unknown_id = vocab.unknown_id();
        Self {
            vocab,
            policy,
            unknown_id,
        }
    }

    /// Create a tokenizer that replaces unknown tokens with the unknown marker
    pub fn permissive(vocab: impl Into<Arc<Vocabulary>>) -> Result<Self, TokenizerError> {
        Self::new(vocab, UnknownTokenPolicy::Substitute)
    }

    /// Create a tokenizer that rejects unknown tokens
    ///
    /// Works with any vocabulary, including one built without special tokens.
    pub fn strict(vocab: impl Into<Arc<Vocabulary>>) -> Self {
        Self::with_policy(vocab.into(), UnknownTokenPolicy::Strict)
    }

    /// Build a vocabulary from `corpus` and wrap it in a permissive tokenizer
    pub fn from_corpus(corpus: &str) -> Self {
        // The default builder always appends the unknown marker
        Self::with_policy(
            Arc::new(Vocabulary::from_corpus(corpus)),
            UnknownTokenPolicy::Substitute,
        )
    }

    /// Encode text to token IDs
    ///
    /// The text is split with the same rule used to build the vocabulary. The
    /// result has one ID per non-empty token, in input order.
    ///
    /// # Errors
    /// A strict tokenizer returns [`TokenizerError::OutOfVocabulary`] for the
    /// first token missing from the vocabulary.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        split_and_clean(text)
            .into_iter()
            .map(|token| self.lookup(token))
            .collect()
    }

    fn lookup(&self, token: String) -> Result<u32, TokenizerError> {
        if let Ok(id) = self.vocab.token_to_id(&token) {
            return Ok(id);
        }
        match self.policy {
            UnknownTokenPolicy::Strict => Err(TokenizerError::OutOfVocabulary(token)),
            UnknownTokenPolicy::Substitute => {
                self.unknown_id.ok_or(TokenizerError::MissingUnknownToken)
            }
        }
    }

    /// Encode a batch of texts
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<u32>>, TokenizerError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Encode several documents into one stream
    ///
    /// The end-of-text ID is inserted between consecutive documents.
    ///
    /// # Errors
    /// Returns [`TokenizerError::MissingEndOfTextToken`] if the vocabulary has
    /// no end-of-text marker, or any error from [`Tokenizer::encode`].
    pub fn encode_documents<I, S>(&self, documents: I) -> Result<Vec<u32>, TokenizerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let end_of_text = self
            .vocab
            .end_of_text_id()
            .ok_or(TokenizerError::MissingEndOfTextToken)?;

        let mut ids = Vec::new();
        for (i, document) in documents.into_iter().enumerate() {
            if i > 0 {
                ids.push(end_of_text);
            }
            ids.extend(self.encode(document.as_ref())?);
        }
        Ok(ids)
    }

    /// Decode token IDs to text
    ///
    /// Tokens are joined with single spaces, then the space before each of
    /// `, . : ; ? ! " ( ) '` is removed.
    ///
    /// # Errors
    /// Returns [`TokenizerError::InvalidId`] for the first ID outside
    /// `0..vocab_size()`.
    pub fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let tokens = ids
            .iter()
            .map(|&id| {
                self.vocab
                    .id_to_token(id)
                    .map_err(|_| TokenizerError::InvalidId {
                        id,
                        vocab_size: self.vocab.size(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let joined = tokens.join(" ");
        Ok(PUNCT_SPACING_RE.replace_all(&joined, "$1").into_owned())
    }

    /// Decode a batch of token ID sequences
    pub fn decode_batch(&self, ids_batch: &[Vec<u32>]) -> Result<Vec<String>, TokenizerError> {
        ids_batch.iter().map(|ids| self.decode(ids)).collect()
    }

    /// Get the ID for a token, if present
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.token_to_id(token).ok()
    }

    /// Get the token for an ID, if present
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.vocab.id_to_token(id).ok()
    }

    /// ID of the unknown-token marker
    pub fn unknown_id(&self) -> Option<u32> {
        self.vocab.unknown_id()
    }

    /// ID of the end-of-text marker
    pub fn end_of_text_id(&self) -> Option<u32> {
        self.vocab.end_of_text_id()
    }

    /// Get vocabulary size
    pub fn vocab_size(&self) -> usize {
        self.vocab.size()
    }

    /// Get the shared vocabulary
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// Out-of-vocabulary handling of this tokenizer
    pub fn policy(&self) -> UnknownTokenPolicy {
        self.policy
    }
}
