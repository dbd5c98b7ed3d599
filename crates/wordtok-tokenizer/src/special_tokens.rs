//! Special token handling

use crate::split::split_and_clean;
use crate::vocab::VocabularyError;

/// Default end-of-text marker
pub const DEFAULT_END_OF_TEXT: &str = "<|endoftext|>";

/// Default unknown-token marker
pub const DEFAULT_UNKNOWN: &str = "<|unk|>";

/// Reserved tokens appended after the sorted corpus tokens
///
/// The end-of-text marker separates documents when several texts are encoded
/// into one stream. The unknown marker stands in for any token missing from the
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokens {
    /// End-of-text marker - separates concatenated documents
    end_of_text: String,
    /// Unknown-token marker - replaces out-of-vocabulary tokens
    unknown: String,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            end_of_text: DEFAULT_END_OF_TEXT.to_string(),
            unknown: DEFAULT_UNKNOWN.to_string(),
        }
    }
}

impl SpecialTokens {
    /// Create special tokens with custom marker strings
    ///
    /// Each marker must survive the split rule as a single token (non-empty, no
    /// whitespace or separator punctuation), and the two must differ.
    pub fn new(
        end_of_text: impl Into<String>,
        unknown: impl Into<String>,
    ) -> Result<Self, VocabularyError> {
        let end_of_text = end_of_text.into();
        let unknown = unknown.into();

        for marker in [&end_of_text, &unknown] {
            if split_and_clean(marker) != [marker.as_str()] {
                return Err(VocabularyError::InvalidSpecialToken(marker.clone()));
            }
        }
        if end_of_text == unknown {
            return Err(VocabularyError::InvalidSpecialToken(unknown));
        }

        Ok(Self {
            end_of_text,
            unknown,
        })
    }

    /// Get the end-of-text marker
    pub fn end_of_text(&self) -> &str {
        &self.end_of_text
    }

    /// Get the unknown-token marker
    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    /// All markers, in the order they are appended to a vocabulary
    pub fn all(&self) -> [&str; 2] {
        [self.end_of_text(), self.unknown()]
    }
}
