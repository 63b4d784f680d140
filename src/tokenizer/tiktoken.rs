//! Tiktoken-based encoder for OpenAI models

use super::Encoder;
use crate::error::{SplitError, SplitResult};
use tiktoken_rs::{cl100k_base, get_bpe_from_model, o200k_base, CoreBPE};

/// Encoder backed by the BPE tables bundled with `tiktoken-rs`
pub struct TiktokenEncoder {
    /// Model name for identification
    model_name: String,
    /// The tiktoken encoder
    bpe: CoreBPE,
}

impl TiktokenEncoder {
    /// Create an encoder for the given model name
    pub fn new(model_name: &str) -> SplitResult<Self> {
        let bpe = Self::bpe_for_model(model_name)?;

        Ok(Self {
            model_name: model_name.to_string(),
            bpe,
        })
    }

    /// Encoder for `text-embedding-3-small`, the default embedding model
    pub fn embedding_3_small() -> SplitResult<Self> {
        Self::new(super::DEFAULT_MODEL)
    }

    fn bpe_for_model(model_name: &str) -> SplitResult<CoreBPE> {
        let bpe = match model_name {
            // Embedding models and the GPT-4/3.5 family share cl100k_base
            name if name.starts_with("text-embedding-3")
                || name.starts_with("text-embedding-ada")
                || name.starts_with("gpt-3.5") =>
            {
                cl100k_base()
            }
            name if name.starts_with("gpt-4o") || name.starts_with("o1") => o200k_base(),
            name if name.starts_with("gpt-4") => cl100k_base(),
            name => get_bpe_from_model(name),
        };

        bpe.map_err(|e| {
            SplitError::dependency_unavailable(format!(
                "no tokenizer for model '{model_name}': {e}"
            ))
        })
    }
}

impl Encoder for TiktokenEncoder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn encode(&self, text: &str) -> SplitResult<Vec<u32>> {
        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|id| id as u32)
            .collect())
    }
}
