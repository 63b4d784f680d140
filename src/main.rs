//! ragchunk: load documents and split them into retrieval-sized chunks.
//!
//! Usage:
//!   ragchunk chunk data/KingLear.txt --max-sentences 3 --tokenizer words
//!   ragchunk chunk docs/ --config chunking.toml --output chunks.json
//!   ragchunk sentences report.pdf

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use ragchunk::logging::{init_logger, LogFormat};
use ragchunk::{
    ChunkManifest, ChunkingConfig, LoaderRegistry, SentenceTokenizer, SplitStrategy,
    TokenizerKind,
};

/// Split text and PDF documents into chunks for embedding.
#[derive(Parser)]
#[command(name = "ragchunk", version)]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "RAGCHUNK_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load documents and split them into chunks.
    Chunk(ChunkArgs),
    /// Print the normalized sentences of each document.
    Sentences(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// A .txt/.pdf file, or a directory searched recursively.
    path: PathBuf,

    /// Encoding label for text files.
    #[arg(long, env = "RAGCHUNK_ENCODING")]
    encoding: Option<String>,
}

#[derive(Args)]
struct ChunkArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// TOML config file; flags below override its values.
    #[arg(long, env = "RAGCHUNK_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    strategy: Option<SplitStrategy>,

    #[arg(long)]
    max_sentences: Option<usize>,

    #[arg(long)]
    sentence_overlap: Option<usize>,

    #[arg(long, env = "RAGCHUNK_MAX_TOKENS")]
    max_tokens: Option<usize>,

    #[arg(long)]
    chunk_size: Option<usize>,

    #[arg(long)]
    chunk_overlap: Option<usize>,

    #[arg(long, value_enum)]
    tokenizer: Option<TokenizerKind>,

    /// Model whose tokenizer counts tokens.
    #[arg(long, env = "RAGCHUNK_MODEL")]
    model: Option<String>,

    /// Split documents on all cores.
    #[arg(long)]
    parallel: bool,

    /// Write a JSON chunk manifest here.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ChunkArgs {
    fn resolve_config(&self) -> Result<ChunkingConfig> {
        let mut config = match &self.config {
            Some(path) => ChunkingConfig::load(path)?,
            None => ChunkingConfig::default(),
        };

        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(n) = self.max_sentences {
            config.max_sentences = n;
        }
        if let Some(n) = self.sentence_overlap {
            config.sentence_overlap = n;
        }
        if let Some(n) = self.max_tokens {
            config.max_tokens = n;
        }
        if let Some(n) = self.chunk_size {
            config.chunk_size = n;
        }
        if let Some(n) = self.chunk_overlap {
            config.chunk_overlap = n;
        }
        if let Some(tokenizer) = self.tokenizer {
            config.tokenizer = tokenizer;
        }
        if let Some(model) = &self.model {
            config.model_name = model.clone();
        }
        if let Some(encoding) = &self.source.encoding {
            config.encoding = encoding.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_format)?;

    match cli.command {
        Command::Chunk(args) => run_chunk(&args),
        Command::Sentences(args) => run_sentences(&args),
    }
}

fn load_documents(path: &Path, encoding: &str) -> Result<Vec<String>> {
    let registry = LoaderRegistry::with_defaults(encoding)?;
    let documents = registry
        .load_path(path)
        .with_context(|| format!("Failed to load documents from {}", path.display()))?;

    info!(
        path = %path.display(),
        documents = documents.len(),
        loaders = ?registry.registered_extensions(),
        "loaded documents"
    );
    Ok(documents)
}

fn run_chunk(args: &ChunkArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = args.resolve_config()?;

    // Step 1: Load
    let step1_start = Instant::now();
    let documents = load_documents(&args.source.path, &config.encoding)?;
    let step1_duration = step1_start.elapsed();

    // Step 2: Split
    let step2_start = Instant::now();
    let splitter = config
        .build_splitter()
        .context("Failed to build splitter")?;
    let chunks = if args.parallel {
        splitter.split_many_parallel(&documents)?
    } else {
        splitter.split_many(&documents)?
    };
    let step2_duration = step2_start.elapsed();
    info!(
        strategy = ?config.strategy,
        chunks = chunks.len(),
        elapsed_ms = step2_duration.as_millis() as u64,
        "split documents"
    );

    println!("Documents:            {}", documents.len());
    println!("Chunks:               {}", chunks.len());
    print_preview(&chunks);

    // Step 3: Manifest
    if let Some(output) = &args.output {
        let counter = config.build_token_counter()?;
        let mut manifest = ChunkManifest::new(
            args.source.path.display().to_string(),
            config.strategy,
            counter.encoder_name(),
        );
        manifest.set_document_count(documents.len());
        manifest.add_chunks(chunks, &counter)?;
        manifest.write_to_file(output)?;

        println!(
            "Avg tokens/chunk:     {:.1}",
            manifest.stats.avg_tokens_per_chunk
        );
        println!("Manifest:             {}", output.display());
    }

    println!("\n=== Timing Breakdown ===");
    println!("Loading:              {:.3}s", step1_duration.as_secs_f64());
    println!("Splitting:            {:.3}s", step2_duration.as_secs_f64());
    println!("Total execution:      {:.3}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Show the first two and last two chunks
fn print_preview(chunks: &[String]) {
    let last = chunks.len().saturating_sub(1);
    let mut picks = vec![0, 1, last.saturating_sub(1), last];
    picks.retain(|&i| i < chunks.len());
    picks.sort_unstable();
    picks.dedup();

    for index in picks {
        println!("-------- chunk {index}");
        println!("{}", chunks[index]);
    }
    if !chunks.is_empty() {
        println!("--------");
    }
}

fn run_sentences(args: &SourceArgs) -> Result<()> {
    let encoding = args.encoding.as_deref().unwrap_or("utf-8");
    let documents = load_documents(&args.path, encoding)?;
    let tokenizer = SentenceTokenizer::default();

    for (doc_index, document) in documents.iter().enumerate() {
        let sentences = tokenizer.tokenize(document)?;
        println!("=== document {doc_index} ({} sentences)", sentences.len());
        for sentence in sentences {
            println!("{sentence}");
        }
    }

    Ok(())
}
