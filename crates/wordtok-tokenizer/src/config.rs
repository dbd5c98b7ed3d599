//! Tokenizer configuration
//!
//! Marker strings and the out-of-vocabulary policy can be loaded from a JSON
//! file instead of being hardcoded. Every field is optional:
//!
//! ```json
//! { "end_of_text": "<|endoftext|>", "unknown": "<|unk|>", "policy": "substitute" }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::special_tokens::{SpecialTokens, DEFAULT_END_OF_TEXT, DEFAULT_UNKNOWN};
use crate::vocab::{VocabularyBuilder, VocabularyError};
use crate::{Tokenizer, UnknownTokenPolicy};

/// Tokenizer settings loaded from file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// End-of-text marker string
    pub end_of_text: String,
    /// Unknown-token marker string
    pub unknown: String,
    /// Out-of-vocabulary handling
    pub policy: UnknownTokenPolicy,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            end_of_text: DEFAULT_END_OF_TEXT.to_string(),
            unknown: DEFAULT_UNKNOWN.to_string(),
            policy: UnknownTokenPolicy::default(),
        }
    }
}

impl TokenizerConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON configuration file
    ///
    /// # Returns
    /// Loaded configuration or error if file cannot be read, parsed, or validated
    ///
    /// # Example
    /// ```no_run
    /// use wordtok_tokenizer::TokenizerConfig;
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = TokenizerConfig::from_file(Path::new("tokenizer.json"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: TokenizerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// Check that the marker strings are usable
    pub fn validate(&self) -> Result<(), VocabularyError> {
        self.special_tokens().map(|_| ())
    }

    /// Special tokens described by this configuration
    pub fn special_tokens(&self) -> Result<SpecialTokens, VocabularyError> {
        SpecialTokens::new(self.end_of_text.as_str(), self.unknown.as_str())
    }

    /// Build a vocabulary from `corpus` and a tokenizer with the configured policy
    ///
    /// Both policies get a vocabulary with reserved markers, so a strict
    /// tokenizer can still separate documents with the end-of-text ID.
    pub fn build_tokenizer(&self, corpus: &str) -> Result<Tokenizer> {
        let special_tokens = self.special_tokens().context("Invalid special tokens")?;
        let vocab = VocabularyBuilder::new()
            .with_special_tokens(special_tokens)
            .build(corpus);
        let tokenizer = Tokenizer::new(vocab, self.policy).context("Failed to create tokenizer")?;
        Ok(tokenizer)
    }
}
