use std::fs;
use std::sync::Arc;

use ragchunk::{
    ChunkManifest, ChunkingConfig, LoaderRegistry, SentenceTextSplitter, SplitStrategy,
    TextSplitter, TokenCounter, TokenizerKind, WordEncoder,
};
use tempfile::TempDir;

const PLAY: &str = "Act one opens in the palace.\nThe king divides his kingdom.\n\
Two daughters flatter him. The third refuses.\nShe is banished.\n\
The storm rises on the heath. The fool sings. A blind man walks.";

fn words_config() -> ChunkingConfig {
    ChunkingConfig {
        max_sentences: 3,
        sentence_overlap: 1,
        max_tokens: 50,
        tokenizer: TokenizerKind::Words,
        ..Default::default()
    }
}

#[test]
fn test_directory_to_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a_play.txt"), PLAY).unwrap();
    fs::write(dir.path().join("b_short.txt"), "Short note. Nothing else.").unwrap();
    fs::write(dir.path().join("ignored.csv"), "a,b,c").unwrap();

    let documents = LoaderRegistry::default().load_path(dir.path()).unwrap();
    assert_eq!(documents.len(), 2);

    let config = words_config();
    let splitter = config.build_splitter().unwrap();
    let chunks = splitter.split_many(&documents).unwrap();

    assert_eq!(
        chunks,
        vec![
            "Act one opens in the palace. The king divides his kingdom. Two daughters flatter him.",
            "Two daughters flatter him. The third refuses. She is banished.",
            "She is banished. The storm rises on the heath. The fool sings.",
            "The fool sings. A blind man walks.",
            "Short note. Nothing else.",
        ]
    );

    let counter = config.build_token_counter().unwrap();
    let mut manifest = ChunkManifest::new(
        dir.path().display().to_string(),
        config.strategy,
        counter.encoder_name(),
    );
    manifest.set_document_count(documents.len());
    manifest.add_chunks(chunks, &counter).unwrap();

    let output = dir.path().join("chunks.json");
    manifest.write_to_file(&output).unwrap();

    let written: ChunkManifest =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.stats.document_count, 2);
    assert_eq!(written.stats.chunk_count, 5);
    assert_eq!(written.strategy, SplitStrategy::Sentence);
    assert_eq!(written.tokenizer, "words");
    assert!(written.chunks.iter().all(|c| c.token_count <= 50));
}

#[test]
fn test_parallel_matches_sequential_on_many_documents() {
    let documents: Vec<String> = (0..40)
        .map(|i| format!("Document {i} begins here. {PLAY} Document {i} ends here."))
        .collect();

    let splitter = SentenceTextSplitter::builder()
        .max_sentences(4)
        .sentence_overlap(2)
        .max_tokens(20)
        .encoder(Arc::new(WordEncoder))
        .build()
        .unwrap();

    let sequential = splitter.split_many(&documents).unwrap();
    let parallel = splitter.split_many_parallel(&documents).unwrap();
    assert_eq!(sequential, parallel);

    let counter = TokenCounter::new(Arc::new(WordEncoder));
    for chunk in &sequential {
        assert!(counter.count_tokens(chunk).unwrap() <= 20);
    }
}

#[test]
fn test_character_strategy_from_config() {
    let config = ChunkingConfig {
        strategy: SplitStrategy::Character,
        chunk_size: 30,
        chunk_overlap: 5,
        tokenizer: TokenizerKind::Words,
        ..Default::default()
    };

    let splitter = config.build_splitter().unwrap();
    let chunks = splitter.split(PLAY).unwrap();

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= 30));
    assert!(chunks[0].starts_with("Act one opens"));
}
