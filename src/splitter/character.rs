use super::TextSplitter;
use crate::error::{SplitError, SplitResult};
use tracing::debug;

/// Default window width in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive windows in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Fixed-width, overlapping character windows.
///
/// Widths and offsets count chars, so a window never cuts a code point.
#[derive(Debug, Clone)]
pub struct CharacterTextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl CharacterTextSplitter {
    /// Fails unless `chunk_size > chunk_overlap`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> SplitResult<Self> {
        if chunk_size <= chunk_overlap {
            return Err(SplitError::invalid_configuration(format!(
                "chunk_size ({chunk_size}) must be greater than chunk_overlap ({chunk_overlap})"
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    fn windows(&self, text: &str) -> Vec<String> {
        // Byte offset of every char, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        let step = self.chunk_size - self.chunk_overlap;

        let mut chunks = Vec::with_capacity(char_count / step + 1);
        let mut start = 0;
        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            chunks.push(text[boundaries[start]..boundaries[end]].to_string());
            start += step;
        }

        chunks
    }
}

impl Default for CharacterTextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl TextSplitter for CharacterTextSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let chunks = self.windows(text);
        debug!(
            chars = text.chars().count(),
            chunks = chunks.len(),
            "character split"
        );

        Ok(chunks)
    }
}

#[cfg(test)]
mod window_tests {
    use super::*;

    #[test]
    fn test_exact_windows() {
        let splitter = CharacterTextSplitter::new(4, 1).unwrap();
        let chunks = splitter.split("abcdefghij").unwrap();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij", "j"]);
    }

    #[test]
    fn test_short_text_single_window() {
        let splitter = CharacterTextSplitter::new(100, 10).unwrap();
        assert_eq!(splitter.split("tiny").unwrap(), vec!["tiny"]);
    }

    #[test]
    fn test_multibyte_chars_are_not_cut() {
        let splitter = CharacterTextSplitter::new(3, 1).unwrap();
        let chunks = splitter.split("héllo wörld").unwrap();
        assert_eq!(chunks, vec!["hél", "llo", "o w", "wör", "rld", "d"]);
    }

    #[test]
    fn test_zero_overlap() {
        let splitter = CharacterTextSplitter::new(5, 0).unwrap();
        assert_eq!(
            splitter.split("aaaaabbbbbcc").unwrap(),
            vec!["aaaaa", "bbbbb", "cc"]
        );
    }
}
