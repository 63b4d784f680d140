use super::{DocumentLoader, LoadError};
use lopdf::Document as PdfDocument;
use std::path::Path;
use tracing::{debug, warn};

/// Loads `.pdf` files as the concatenated text of their pages.
///
/// Each page's text is followed by a newline. Pages whose text cannot be
/// extracted are skipped with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfFileLoader;

impl DocumentLoader for PdfFileLoader {
    fn extension(&self) -> &str {
        "pdf"
    }

    fn load_file(&self, path: &Path) -> Result<String, LoadError> {
        let doc = PdfDocument::load(path).map_err(|source| LoadError::Pdf {
            path: path.display().to_string(),
            source,
        })?;
        let pages = doc.get_pages();

        let mut content = String::new();
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => {
                    content.push_str(&text);
                    content.push('\n');
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        page = *page_num,
                        error = %e,
                        "skipping page without extractable text"
                    );
                }
            }
        }

        debug!(
            path = %path.display(),
            pages = pages.len(),
            chars = content.chars().count(),
            "loaded pdf"
        );
        Ok(content)
    }
}
