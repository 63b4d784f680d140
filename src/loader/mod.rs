mod error;
mod pdf;
mod registry;
mod text;


pub use error::LoadError;
pub use pdf::PdfFileLoader;
pub use registry::LoaderRegistry;
pub use text::TextFileLoader;

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// A source of documents for one file extension
pub trait DocumentLoader: Send + Sync {
    /// Extension handled by this loader, without the dot (e.g. "txt")
    fn extension(&self) -> &str;

    /// Read a single file into one document
    fn load_file(&self, path: &Path) -> Result<String, LoadError>;

    /// Whether `path` carries this loader's extension (case-insensitive)
    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(self.extension()))
    }

    /// Load a directory tree or a single matching file.
    ///
    /// Anything else is rejected with [`LoadError::InvalidPath`].
    fn load(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        if path.is_dir() {
            self.load_directory(path)
        } else if path.is_file() && self.matches(path) {
            Ok(vec![self.load_file(path)?])
        } else {
            Err(LoadError::InvalidPath(format!(
                "{} is neither a directory nor a .{} file",
                path.display(),
                self.extension()
            )))
        }
    }

    /// Load every matching file below `dir`, in file-name order
    fn load_directory(&self, dir: &Path) -> Result<Vec<String>, LoadError> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.matches(entry.path()) {
                documents.push(self.load_file(entry.path())?);
            }
        }

        debug!(
            dir = %dir.display(),
            extension = self.extension(),
            documents = documents.len(),
            "loaded directory"
        );

        Ok(documents)
    }
}
