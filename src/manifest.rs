use crate::config::SplitStrategy;
use crate::error::SplitResult;
use crate::tokenizer::TokenCounter;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkManifest {
    pub version: String,
    pub created_at: String,
    pub generator: String,
    /// Path the documents were loaded from
    pub source: String,
    pub strategy: SplitStrategy,
    pub tokenizer: String,
    pub stats: ManifestStats,
    pub chunks: Vec<ChunkRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ManifestStats {
    pub document_count: u32,
    pub chunk_count: u32,
    pub total_tokens: u64,
    pub avg_tokens_per_chunk: f64,
}

/// One emitted chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Position in the flat chunk sequence
    pub index: u32,
    /// SHA-256 of the chunk text; identical chunks share an id
    pub id: String,
    pub char_count: usize,
    pub token_count: usize,
    pub text: String,
}

impl ChunkManifest {
    pub fn new(source: impl Into<String>, strategy: SplitStrategy, tokenizer: &str) -> Self {
        Self {
            version: "1.0.0".to_string(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("ragchunk v{}", env!("CARGO_PKG_VERSION")),
            source: source.into(),
            strategy,
            tokenizer: tokenizer.to_string(),
            stats: ManifestStats::default(),
            chunks: Vec::new(),
        }
    }

    pub fn set_document_count(&mut self, count: usize) {
        self.stats.document_count = count as u32;
    }

    /// Append chunks in order, counting their tokens with `counter`
    pub fn add_chunks(&mut self, chunks: Vec<String>, counter: &TokenCounter) -> SplitResult<()> {
        for text in chunks {
            let token_count = counter.count_tokens(&text)?;
            self.chunks.push(ChunkRecord {
                index: self.chunks.len() as u32,
                id: chunk_id(&text),
                char_count: text.chars().count(),
                token_count,
                text,
            });
        }

        self.update_stats();
        Ok(())
    }

    fn update_stats(&mut self) {
        let total_tokens: u64 = self.chunks.iter().map(|c| c.token_count as u64).sum();

        self.stats.chunk_count = self.chunks.len() as u32;
        self.stats.total_tokens = total_tokens;
        self.stats.avg_tokens_per_chunk = if self.chunks.is_empty() {
            0.0
        } else {
            total_tokens as f64 / self.chunks.len() as f64
        };
    }

    /// Write the manifest as pretty-printed JSON
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

        info!(
            path = %path.display(),
            chunks = self.stats.chunk_count,
            "wrote chunk manifest"
        );
        Ok(())
    }
}

/// Hex SHA-256 of a chunk's text
pub fn chunk_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WordEncoder;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn counter() -> TokenCounter {
        TokenCounter::new(Arc::new(WordEncoder))
    }

    #[test]
    fn test_chunk_id_is_stable_sha256() {
        assert_eq!(
            chunk_id(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(chunk_id("same text"), chunk_id("same text"));
        assert_ne!(chunk_id("same text"), chunk_id("other text"));
    }

    #[test]
    fn test_add_chunks_updates_stats() {
        let mut manifest = ChunkManifest::new("docs/", SplitStrategy::Sentence, "words");
        manifest.set_document_count(2);
        manifest
            .add_chunks(
                vec!["one two three".to_string(), "four".to_string()],
                &counter(),
            )
            .unwrap();
        manifest
            .add_chunks(vec!["five six".to_string()], &counter())
            .unwrap();

        assert_eq!(manifest.stats.document_count, 2);
        assert_eq!(manifest.stats.chunk_count, 3);
        assert_eq!(manifest.stats.total_tokens, 6);
        assert!((manifest.stats.avg_tokens_per_chunk - 2.0).abs() < f64::EPSILON);

        let indexes: Vec<u32> = manifest.chunks.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(manifest.chunks[1].char_count, 4);
    }

    #[test]
    fn test_write_to_file_round_trips_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunks.json");

        let mut manifest = ChunkManifest::new("notes.txt", SplitStrategy::Character, "words");
        manifest
            .add_chunks(vec!["hello world".to_string()], &counter())
            .unwrap();
        manifest.write_to_file(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["strategy"], "character");
        assert_eq!(value["stats"]["chunk_count"], 1);
        assert_eq!(value["chunks"][0]["id"], chunk_id("hello world"));
        assert_eq!(value["chunks"][0]["token_count"], 2);
    }
}
