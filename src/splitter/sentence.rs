use super::{CharacterTextSplitter, TextSplitter};
use crate::error::{SplitError, SplitResult};
use crate::sentence::{SentenceDetector, SentenceTokenizer, UnicodeSentenceDetector};
use crate::tokenizer::{Encoder, TiktokenEncoder, TokenCounter};
use std::sync::Arc;
use tracing::debug;

/// Maximum sentences per chunk
pub const DEFAULT_MAX_SENTENCES: usize = 5;

/// Sentences carried over from one chunk into the next
pub const DEFAULT_SENTENCE_OVERLAP: usize = 1;

/// Input limit of `text-embedding-3-small`
pub const DEFAULT_MAX_TOKENS: usize = 8191;

/// Rough chars-per-token ratio used to size the fallback windows
pub const CHARS_PER_TOKEN: usize = 4;

/// Overlap of the fallback windows for oversized sentences
pub const FALLBACK_CHUNK_OVERLAP: usize = 50;

/// Groups sentences into chunks bounded by a sentence count and a token
/// budget, with sentence overlap between neighbours.
///
/// A sentence that alone exceeds the token budget is cut into character
/// windows of `max_tokens * CHARS_PER_TOKEN` chars instead. Those windows go
/// straight to the output and take no part in the overlap.
#[derive(Debug)]
pub struct SentenceTextSplitter {
    max_sentences: usize,
    sentence_overlap: usize,
    max_tokens: usize,
    counter: TokenCounter,
    sentences: SentenceTokenizer,
    fallback: CharacterTextSplitter,
}

/// Builder for [`SentenceTextSplitter`]
pub struct SentenceSplitterBuilder {
    max_sentences: usize,
    sentence_overlap: usize,
    max_tokens: usize,
    encoder: Option<Arc<dyn Encoder>>,
    detector: Option<Arc<dyn SentenceDetector>>,
}

impl SentenceSplitterBuilder {
    /// Create a builder with default limits
    pub fn new() -> Self {
        Self {
            max_sentences: DEFAULT_MAX_SENTENCES,
            sentence_overlap: DEFAULT_SENTENCE_OVERLAP,
            max_tokens: DEFAULT_MAX_TOKENS,
            encoder: None,
            detector: None,
        }
    }

    pub fn max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = max_sentences;
        self
    }

    pub fn sentence_overlap(mut self, sentence_overlap: usize) -> Self {
        self.sentence_overlap = sentence_overlap;
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Tokenizer used for the token budget (default: `text-embedding-3-small`)
    pub fn encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Sentence boundary detector (default: UAX #29)
    pub fn detector(mut self, detector: Arc<dyn SentenceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Validate the limits and assemble the splitter
    pub fn build(self) -> SplitResult<SentenceTextSplitter> {
        if self.max_sentences <= self.sentence_overlap {
            return Err(SplitError::invalid_configuration(format!(
                "max_sentences ({}) must be greater than sentence_overlap ({})",
                self.max_sentences, self.sentence_overlap
            )));
        }
        if self.max_tokens == 0 {
            return Err(SplitError::invalid_configuration(
                "max_tokens must be greater than zero",
            ));
        }

        let encoder: Arc<dyn Encoder> = match self.encoder {
            Some(encoder) => encoder,
            None => Arc::new(TiktokenEncoder::embedding_3_small()?),
        };
        let detector: Arc<dyn SentenceDetector> = match self.detector {
            Some(detector) => detector,
            None => Arc::new(UnicodeSentenceDetector),
        };

        let fallback_size = self.max_tokens.saturating_mul(CHARS_PER_TOKEN);
        // Small budgets cannot fit the full overlap inside a window
        let fallback_overlap = FALLBACK_CHUNK_OVERLAP.min(fallback_size / 2);

        Ok(SentenceTextSplitter {
            max_sentences: self.max_sentences,
            sentence_overlap: self.sentence_overlap,
            max_tokens: self.max_tokens,
            counter: TokenCounter::new(encoder),
            sentences: SentenceTokenizer::new(detector),
            fallback: CharacterTextSplitter::new(fallback_size, fallback_overlap)?,
        })
    }
}

impl Default for SentenceSplitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceTextSplitter {
    pub fn builder() -> SentenceSplitterBuilder {
        SentenceSplitterBuilder::new()
    }

    pub fn max_sentences(&self) -> usize {
        self.max_sentences
    }

    pub fn sentence_overlap(&self) -> usize {
        self.sentence_overlap
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Counter used for the token budget
    pub fn token_counter(&self) -> &TokenCounter {
        &self.counter
    }

    /// Tokenizer that produces the sentence sequence
    pub fn sentence_tokenizer(&self) -> &SentenceTokenizer {
        &self.sentences
    }

    /// Character splitter applied to oversized sentences
    pub fn fallback(&self) -> &CharacterTextSplitter {
        &self.fallback
    }

    /// Tokens of the chunk that `buffer` followed by `incoming` would emit.
    ///
    /// Counted on the joined text, since a tokenizer may merge or split
    /// tokens across the separating space.
    fn joined_tokens(&self, buffer: &[String], incoming: &str) -> SplitResult<usize> {
        let mut candidate = join_sentences(buffer);
        if !candidate.is_empty() {
            candidate.push(' ');
        }
        candidate.push_str(incoming);
        self.counter.count_tokens(&candidate)
    }

    /// Keep the trailing overlap of a flushed buffer, then drop sentences from
    /// its front until `incoming` fits the budget after them.
    fn retain_overlap(&self, buffer: &mut Vec<String>, incoming: &str) -> SplitResult<()> {
        let flushed = buffer.len() - self.sentence_overlap.min(buffer.len());
        buffer.drain(..flushed);

        while !buffer.is_empty() && self.joined_tokens(buffer, incoming)? > self.max_tokens {
            buffer.remove(0);
        }

        Ok(())
    }
}

fn join_sentences(buffer: &[String]) -> String {
    buffer.join(" ")
}

impl TextSplitter for SentenceTextSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        let sentences = self.sentences.tokenize(text)?;
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let sentence_count = sentences.len();
        let mut chunks = Vec::new();
        let mut buffer: Vec<String> = Vec::new();
        let mut fallback_chunks = 0;

        for sentence in sentences {
            let tokens = self.counter.count_tokens(&sentence)?;

            // A single sentence over budget is cut into character windows
            if tokens > self.max_tokens {
                if !buffer.is_empty() {
                    chunks.push(join_sentences(&buffer));
                    buffer.clear();
                }

                let pieces = self.fallback.split(&sentence)?;
                fallback_chunks += pieces.len();
                chunks.extend(pieces);
                continue;
            }

            if !buffer.is_empty() {
                let full = buffer.len() >= self.max_sentences;
                if full || self.joined_tokens(&buffer, &sentence)? > self.max_tokens {
                    chunks.push(join_sentences(&buffer));
                    self.retain_overlap(&mut buffer, &sentence)?;
                }
            }

            buffer.push(sentence);
        }

        if !buffer.is_empty() {
            chunks.push(join_sentences(&buffer));
        }

        debug!(
            sentences = sentence_count,
            chunks = chunks.len(),
            fallback_chunks,
            "sentence split"
        );

        Ok(chunks)
    }
}
