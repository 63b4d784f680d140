use super::{DocumentLoader, LoadError, PdfFileLoader, TextFileLoader};
use std::path::Path;

/// Dispatch table of document loaders, keyed by file extension
pub struct LoaderRegistry {
    /// Registration order is also the order directories are loaded in
    loaders: Vec<Box<dyn DocumentLoader>>,
}

impl LoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Text (with the given encoding) and PDF loaders
    pub fn with_defaults(encoding: &str) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        registry.register(TextFileLoader::with_encoding(encoding)?);
        registry.register(PdfFileLoader);
        Ok(registry)
    }

    /// Register a loader, replacing any loader for the same extension
    pub fn register(&mut self, loader: impl DocumentLoader + 'static) {
        let extension = loader.extension().to_lowercase();
        self.loaders
            .retain(|existing| existing.extension().to_lowercase() != extension);
        self.loaders.push(Box::new(loader));
    }

    /// Select the loader for a file path, if any handles its extension
    pub fn select(&self, path: &Path) -> Option<&dyn DocumentLoader> {
        self.loaders
            .iter()
            .find(|loader| loader.matches(path))
            .map(|loader| &**loader)
    }

    /// Get the number of registered loaders
    pub fn loader_count(&self) -> usize {
        self.loaders.len()
    }

    /// List all registered extensions, in registration order
    pub fn registered_extensions(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.extension()).collect()
    }

    /// Load a single supported file, or every supported file below a
    /// directory (grouped by loader, in registration order)
    pub fn load_path(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        if path.is_dir() {
            let mut documents = Vec::new();
            for loader in &self.loaders {
                documents.extend(loader.load_directory(path)?);
            }
            return Ok(documents);
        }

        match self.select(path) {
            Some(loader) => loader.load(path),
            None => Err(LoadError::InvalidPath(format!(
                "{} is neither a directory nor a supported file ({})",
                path.display(),
                self.registered_extensions().join(", ")
            ))),
        }
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(TextFileLoader::new());
        registry.register(PdfFileLoader);
        registry
    }
}
