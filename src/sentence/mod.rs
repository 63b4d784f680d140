mod unicode;


pub use unicode::UnicodeSentenceDetector;

use crate::error::SplitResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Finds sentence boundaries in normalized text.
///
/// A line break in the input must always end a sentence; the tokenizer
/// relies on this to force breaks before list items.
pub trait SentenceDetector: Send + Sync {
    fn name(&self) -> &str;

    /// Split text into sentences, in document order
    fn detect(&self, text: &str) -> SplitResult<Vec<String>>;
}

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// Sentence-ending punctuation running straight into a bullet or list number,
// the usual shape of list items after PDF extraction
static LIST_ITEM_RUN_ON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])\s*([•\-\d]+\s)").expect("list item pattern is valid"));

/// Normalizes raw document text and splits it into sentences
#[derive(Clone)]
pub struct SentenceTokenizer {
    detector: Arc<dyn SentenceDetector>,
}

impl SentenceTokenizer {
    pub fn new(detector: Arc<dyn SentenceDetector>) -> Self {
        Self { detector }
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    /// Split `text` into trimmed, non-empty sentences.
    ///
    /// Sentences that open with a bullet or list number keep their marker.
    pub fn tokenize(&self, text: &str) -> SplitResult<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let normalized = normalize(text);
        let sentences = self
            .detector
            .detect(&normalized)?
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(sentences)
    }
}

impl Default for SentenceTokenizer {
    fn default() -> Self {
        Self::new(Arc::new(UnicodeSentenceDetector))
    }
}

impl fmt::Debug for SentenceTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceTokenizer")
            .field("detector", &self.detector.name())
            .finish()
    }
}

/// Flatten line breaks, collapse whitespace, then break list items that run
/// on from the previous sentence onto their own line.
pub fn normalize(text: &str) -> String {
    let flattened = text.replace('\n', " ");
    let collapsed = WHITESPACE_RUN.replace_all(&flattened, " ");
    LIST_ITEM_RUN_ON
        .replace_all(collapsed.trim(), "${1}\n${2}")
        .into_owned()
}
