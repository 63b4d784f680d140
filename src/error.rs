//! Error types for the splitting core
//!
//! Tokenizer and sentence detector failures surface here unchanged; the
//! splitters never swallow or reinterpret them.

use thiserror::Error;

/// Errors raised while building or running a text splitter
#[derive(Error, Debug)]
pub enum SplitError {
    /// A splitter invariant was violated at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The tokenizer or sentence detector could not be obtained
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// The injected tokenizer failed on a piece of text
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// The injected sentence detector failed on a piece of text
    #[error("Sentence detection error: {0}")]
    SentenceDetection(String),
}

impl SplitError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a dependency unavailable error
    pub fn dependency_unavailable(msg: impl Into<String>) -> Self {
        Self::DependencyUnavailable(msg.into())
    }
}

/// Result type alias for splitting operations
pub type SplitResult<T> = Result<T, SplitError>;
