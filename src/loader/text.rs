use super::{DocumentLoader, LoadError};
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads `.txt` files, decoding them with a fixed encoding
#[derive(Debug, Clone, Copy)]
pub struct TextFileLoader {
    encoding: &'static Encoding,
}

impl TextFileLoader {
    /// UTF-8 loader
    pub fn new() -> Self {
        Self { encoding: UTF_8 }
    }

    /// Loader for any WHATWG encoding label ("utf-8", "latin1", "shift_jis", ...)
    pub fn with_encoding(label: &str) -> Result<Self, LoadError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| LoadError::UnknownEncoding(label.to_string()))
    }

    /// Canonical name of the encoding in use
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }
}

impl Default for TextFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for TextFileLoader {
    fn extension(&self) -> &str {
        "txt"
    }

    fn load_file(&self, path: &Path) -> Result<String, LoadError> {
        let bytes = fs::read(path)?;
        let (text, _, had_errors) = self.encoding.decode(&bytes);

        if had_errors {
            return Err(LoadError::InvalidInput {
                path: path.display().to_string(),
                encoding: self.encoding.name().to_string(),
            });
        }

        debug!(
            path = %path.display(),
            bytes = bytes.len(),
            encoding = self.encoding.name(),
            "loaded text file"
        );
        Ok(text.into_owned())
    }
}
