//! Tokenizer errors

use thiserror::Error;

/// Errors produced while encoding or decoding
///
/// Every operation is deterministic, so none of these are worth retrying: fix
/// the input or rebuild the vocabulary from a corpus that covers it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// A strict tokenizer met a token that is not in its vocabulary
    #[error("Token not in vocabulary: {0:?}")]
    OutOfVocabulary(String),

    /// An ID passed to decode is outside `0..vocab_size`
    #[error("Invalid token ID {id} (vocabulary size {vocab_size})")]
    InvalidId { id: u32, vocab_size: usize },

    /// Substitution was requested but the vocabulary has no unknown marker
    #[error("Vocabulary has no unknown-token marker")]
    MissingUnknownToken,

    /// Document boundaries were requested but the vocabulary has no end-of-text marker
    #[error("Vocabulary has no end-of-text marker")]
    MissingEndOfTextToken,
}
