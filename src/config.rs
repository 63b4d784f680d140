//! Chunking configuration
//!
//! Loaded from a TOML file; every field falls back to its default so a file
//! only needs to name what it changes:
//!
//! ```toml
//! strategy = "sentence"
//! max_sentences = 3
//! sentence_overlap = 1
//! max_tokens = 512
//! tokenizer = "words"
//! ```

use crate::error::{SplitError, SplitResult};
use crate::splitter::{
    CharacterTextSplitter, SentenceTextSplitter, TextSplitter, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_SENTENCES, DEFAULT_MAX_TOKENS, DEFAULT_SENTENCE_OVERLAP,
};
use crate::tokenizer::{Encoder, TiktokenEncoder, TokenCounter, WordEncoder, DEFAULT_MODEL};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Which splitter to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Sentence groups under a sentence count and token budget
    #[default]
    Sentence,
    /// Fixed-width overlapping character windows
    Character,
}

/// Which tokenizer backs the token budget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// BPE tables for `model_name`
    #[default]
    Tiktoken,
    /// One token per whitespace-separated word
    Words,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingConfig {
    pub strategy: SplitStrategy,
    /// Character window width
    pub chunk_size: usize,
    /// Character window overlap
    pub chunk_overlap: usize,
    pub max_sentences: usize,
    pub sentence_overlap: usize,
    pub max_tokens: usize,
    pub tokenizer: TokenizerKind,
    /// Model whose tokenizer is used with `tokenizer = "tiktoken"`
    pub model_name: String,
    /// Encoding label for text files
    pub encoding: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: SplitStrategy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            max_sentences: DEFAULT_MAX_SENTENCES,
            sentence_overlap: DEFAULT_SENTENCE_OVERLAP,
            max_tokens: DEFAULT_MAX_TOKENS,
            tokenizer: TokenizerKind::default(),
            model_name: DEFAULT_MODEL.to_string(),
            encoding: "utf-8".to_string(),
        }
    }
}

impl ChunkingConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ChunkingConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants of the configured strategy
    pub fn validate(&self) -> SplitResult<()> {
        match self.strategy {
            SplitStrategy::Character if self.chunk_size <= self.chunk_overlap => {
                Err(SplitError::invalid_configuration(format!(
                    "chunk_size ({}) must be greater than chunk_overlap ({})",
                    self.chunk_size, self.chunk_overlap
                )))
            }
            SplitStrategy::Sentence if self.max_sentences <= self.sentence_overlap => {
                Err(SplitError::invalid_configuration(format!(
                    "max_sentences ({}) must be greater than sentence_overlap ({})",
                    self.max_sentences, self.sentence_overlap
                )))
            }
            SplitStrategy::Sentence if self.max_tokens == 0 => Err(
                SplitError::invalid_configuration("max_tokens must be greater than zero"),
            ),
            _ => Ok(()),
        }
    }

    /// Resolve the configured tokenizer
    pub fn build_encoder(&self) -> SplitResult<Arc<dyn Encoder>> {
        let encoder: Arc<dyn Encoder> = match self.tokenizer {
            TokenizerKind::Tiktoken => Arc::new(TiktokenEncoder::new(&self.model_name)?),
            TokenizerKind::Words => Arc::new(WordEncoder),
        };
        Ok(encoder)
    }

    /// Token counter over the configured tokenizer
    pub fn build_token_counter(&self) -> SplitResult<TokenCounter> {
        Ok(TokenCounter::new(self.build_encoder()?))
    }

    /// Build the configured splitter
    pub fn build_splitter(&self) -> SplitResult<Box<dyn TextSplitter>> {
        self.validate()?;

        let splitter: Box<dyn TextSplitter> = match self.strategy {
            SplitStrategy::Character => Box::new(CharacterTextSplitter::new(
                self.chunk_size,
                self.chunk_overlap,
            )?),
            SplitStrategy::Sentence => Box::new(
                SentenceTextSplitter::builder()
                    .max_sentences(self.max_sentences)
                    .sentence_overlap(self.sentence_overlap)
                    .max_tokens(self.max_tokens)
                    .encoder(self.build_encoder()?)
                    .build()?,
            ),
        };
        Ok(splitter)
    }
}
