use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Invalid input: {path} is not valid {encoding}")]
    InvalidInput { path: String, encoding: String },

    #[error("Failed to read PDF {path}: {source}")]
    Pdf {
        path: String,
        #[source]
        source: lopdf::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}
