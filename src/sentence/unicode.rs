use super::SentenceDetector;
use crate::error::SplitResult;
use unicode_segmentation::UnicodeSegmentation;

/// Sentence boundaries per Unicode UAX #29.
///
/// Needs no downloaded model data. Line breaks are hard boundaries under the
/// standard, so forced list-item breaks are honored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceDetector;

impl SentenceDetector for UnicodeSentenceDetector {
    fn name(&self) -> &str {
        "unicode"
    }

    fn detect(&self, text: &str) -> SplitResult<Vec<String>> {
        Ok(text.split_sentence_bounds().map(str::to_string).collect())
    }
}
