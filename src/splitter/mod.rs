mod character;
mod sentence;


pub use character::{CharacterTextSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use sentence::{
    SentenceSplitterBuilder, SentenceTextSplitter, CHARS_PER_TOKEN, DEFAULT_MAX_SENTENCES,
    DEFAULT_MAX_TOKENS, DEFAULT_SENTENCE_OVERLAP, FALLBACK_CHUNK_OVERLAP,
};

use crate::error::SplitResult;
use rayon::prelude::*;

/// Core trait that all text splitters implement
pub trait TextSplitter: Send + Sync {
    /// Split one document into ordered chunks.
    ///
    /// Empty or whitespace-only text yields no chunks.
    fn split(&self, text: &str) -> SplitResult<Vec<String>>;

    /// Split every document in order and concatenate the chunks
    fn split_many(&self, texts: &[String]) -> SplitResult<Vec<String>> {
        let mut chunks = Vec::new();
        for text in texts {
            chunks.extend(self.split(text)?);
        }
        Ok(chunks)
    }

    /// Same output as [`TextSplitter::split_many`], with documents split on
    /// the rayon pool
    fn split_many_parallel(&self, texts: &[String]) -> SplitResult<Vec<String>> {
        let per_document = texts
            .par_iter()
            .map(|text| self.split(text))
            .collect::<SplitResult<Vec<_>>>()?;

        Ok(per_document.into_iter().flatten().collect())
    }
}
