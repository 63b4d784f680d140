use super::*;
use crate::error::SplitError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts calls so tests can assert the encoder was bypassed
struct CountingEncoder {
    calls: AtomicUsize,
}

impl Encoder for CountingEncoder {
    fn name(&self) -> &str {
        "counting"
    }

    fn encode(&self, text: &str) -> SplitResult<Vec<u32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        WordEncoder.encode(text)
    }
}

struct FailingEncoder;

impl Encoder for FailingEncoder {
    fn name(&self) -> &str {
        "failing"
    }

    fn encode(&self, _text: &str) -> SplitResult<Vec<u32>> {
        Err(SplitError::Tokenizer("model offline".to_string()))
    }
}

#[test]
fn test_word_encoder_counts_words() {
    let counter = TokenCounter::new(Arc::new(WordEncoder));
    assert_eq!(counter.count_tokens("one two  three\nfour").unwrap(), 4);
    assert_eq!(counter.encoder_name(), "words");
}

#[test]
fn test_empty_and_whitespace_are_zero() {
    let encoder = Arc::new(CountingEncoder {
        calls: AtomicUsize::new(0),
    });
    let counter = TokenCounter::new(encoder.clone());

    assert_eq!(counter.count_tokens("").unwrap(), 0);
    assert_eq!(counter.count_tokens("   \n\t").unwrap(), 0);
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);

    assert_eq!(counter.count_tokens("hello").unwrap(), 1);
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_encoder_errors_propagate() {
    let counter = TokenCounter::new(Arc::new(FailingEncoder));
    let err = counter.count_tokens("anything").unwrap_err();
    assert!(matches!(err, SplitError::Tokenizer(_)));

    // Whitespace never reaches the encoder
    assert_eq!(counter.count_tokens(" ").unwrap(), 0);
}

#[test]
fn test_tiktoken_embedding_model() {
    let encoder = TiktokenEncoder::embedding_3_small().expect("Should load cl100k_base");
    assert_eq!(encoder.name(), "text-embedding-3-small");

    let counter = TokenCounter::new(Arc::new(encoder));
    let count = counter.count_tokens("Hello, world!").unwrap();
    assert!(count > 0 && count <= 5, "Simple text should be ~4 tokens");
}

#[test]
fn test_tiktoken_unknown_model() {
    let result = TiktokenEncoder::new("definitely-not-a-model");
    assert!(matches!(result, Err(SplitError::DependencyUnavailable(_))));
}

#[test]
fn test_debug_shows_encoder_name() {
    let counter = TokenCounter::new(Arc::new(WordEncoder));
    assert_eq!(format!("{counter:?}"), "TokenCounter { encoder: \"words\" }");
}
