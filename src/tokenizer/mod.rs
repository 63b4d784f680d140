mod tiktoken;

#[cfg(test)]
mod tests;

pub use tiktoken::TiktokenEncoder;

use crate::error::SplitResult;
use std::fmt;
use std::sync::Arc;

/// Model whose tokenizer is used when none is configured
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// A subword tokenizer. Only the length of the encoded sequence is ever used.
pub trait Encoder: Send + Sync {
    /// Human readable name (model or scheme)
    fn name(&self) -> &str;

    /// Encode text into token ids
    fn encode(&self, text: &str) -> SplitResult<Vec<u32>>;
}

/// Counts whitespace-separated words, one token per word.
///
/// Deterministic and model-free, which makes it the encoder of choice for
/// tests and for quick runs without BPE tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordEncoder;

impl Encoder for WordEncoder {
    fn name(&self) -> &str {
        "words"
    }

    fn encode(&self, text: &str) -> SplitResult<Vec<u32>> {
        Ok(text
            .split_whitespace()
            .enumerate()
            .map(|(i, _)| i as u32)
            .collect())
    }
}

/// Token counting over an injected encoder
#[derive(Clone)]
pub struct TokenCounter {
    encoder: Arc<dyn Encoder>,
}

impl TokenCounter {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self { encoder }
    }

    /// Name of the underlying encoder
    pub fn encoder_name(&self) -> &str {
        self.encoder.name()
    }

    /// Count tokens in `text`.
    ///
    /// Empty and whitespace-only text counts as zero without touching the
    /// encoder.
    pub fn count_tokens(&self, text: &str) -> SplitResult<usize> {
        if text.trim().is_empty() {
            return Ok(0);
        }
        Ok(self.encoder.encode(text)?.len())
    }
}

impl fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoder", &self.encoder.name())
            .finish()
    }
}
