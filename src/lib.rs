// Public API exports
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod manifest;
pub mod sentence;
pub mod splitter;
pub mod tokenizer;

// Re-export main types for convenience
pub use error::{SplitError, SplitResult};

pub use tokenizer::{Encoder, TiktokenEncoder, TokenCounter, WordEncoder, DEFAULT_MODEL};

pub use sentence::{SentenceDetector, SentenceTokenizer, UnicodeSentenceDetector};

pub use splitter::{
    CharacterTextSplitter, SentenceSplitterBuilder, SentenceTextSplitter, TextSplitter,
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_SENTENCES, DEFAULT_MAX_TOKENS,
    DEFAULT_SENTENCE_OVERLAP,
};

pub use loader::{DocumentLoader, LoadError, LoaderRegistry, PdfFileLoader, TextFileLoader};

pub use config::{ChunkingConfig, SplitStrategy, TokenizerKind};
pub use manifest::{ChunkManifest, ChunkRecord, ManifestStats};
