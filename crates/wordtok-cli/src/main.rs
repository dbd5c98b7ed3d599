//! Command-line interface for wordtok
//!
//! Builds a vocabulary from a document and encodes or decodes text with it.
//!
//! # Usage
//!
//! ```bash
//! wordtok stats corpus.txt
//! wordtok encode corpus.txt --text "Hello, world." [--strict] [--config tokenizer.json]
//! wordtok decode corpus.txt --ids 12,3,40,5 [--config tokenizer.json]
//! ```
//!
//! Files ending in `.pdf` are read through the PDF source when the binary is
//! built with `--features pdf`.

mod source;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wordtok_tokenizer::split::split_and_clean;
use wordtok_tokenizer::{Tokenizer, TokenizerConfig, UnknownTokenPolicy};

/// Characters shown by `stats` as a preview of the document
const PREVIEW_CHARS: usize = 99;
/// Tokens shown by `stats` as a preview of the split
const PREVIEW_TOKENS: usize = 30;

/// Word-level tokenizer over a document's vocabulary
#[derive(Parser, Debug)]
#[command(name = "wordtok")]
#[command(about = "Build a word-level vocabulary from a document and encode or decode text", long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print corpus and vocabulary statistics
    Stats {
        /// Document to build the vocabulary from
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Encode text to token IDs (printed as JSON)
    Encode {
        /// Document to build the vocabulary from
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Text to encode (defaults to the document itself)
        #[arg(long)]
        text: Option<String>,

        /// Fail on tokens missing from the vocabulary instead of substituting
        #[arg(long)]
        strict: bool,

        /// Path to tokenizer configuration file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Decode comma-separated token IDs to text
    Decode {
        /// Document to build the vocabulary from
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Token IDs, e.g. 12,3,40
        #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
        ids: Vec<u32>,

        /// Path to tokenizer configuration file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// Result of the `encode` command
#[derive(Debug, Serialize)]
struct EncodeReport {
    vocab_size: usize,
    num_tokens: usize,
    ids: Vec<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Stats { input } => {
            let corpus = source::read_text(&input)?;
            print_stats(&corpus);
        }
        Command::Encode {
            input,
            text,
            strict,
            config,
        } => {
            let corpus = source::read_text(&input)?;
            let mut config = load_config(config.as_deref())?;
            if strict {
                config.policy = UnknownTokenPolicy::Strict;
            }
            let report = encode(&corpus, text.as_deref(), &config)?;
            let json =
                serde_json::to_string(&report).context("Failed to serialize encode report")?;
            println!("{json}");
        }
        Command::Decode { input, ids, config } => {
            let corpus = source::read_text(&input)?;
            let config = load_config(config.as_deref())?;
            let tokenizer = config.build_tokenizer(&corpus)?;
            let text = tokenizer.decode(&ids).context("Failed to decode token IDs")?;
            println!("{text}");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TokenizerConfig> {
    match path {
        Some(path) => TokenizerConfig::from_file(path).context("Failed to load config file"),
        None => Ok(TokenizerConfig::default()),
    }
}

fn print_stats(corpus: &str) {
    let preview: String = corpus.chars().take(PREVIEW_CHARS).collect();
    let tokens = split_and_clean(corpus);
    let tokenizer = Tokenizer::from_corpus(corpus);

    println!("Total characters: {}", corpus.chars().count());
    println!("{preview}");
    println!("{:?}", &tokens[..tokens.len().min(PREVIEW_TOKENS)]);
    println!("Total tokens: {}", tokens.len());
    println!("Vocabulary size: {}", tokenizer.vocab_size());
}

fn encode(corpus: &str, text: Option<&str>, config: &TokenizerConfig) -> Result<EncodeReport> {
    let tokenizer = config.build_tokenizer(corpus)?;
    let ids = tokenizer
        .encode(text.unwrap_or(corpus))
        .context("Failed to encode text")?;

    Ok(EncodeReport {
        vocab_size: tokenizer.vocab_size(),
        num_tokens: ids.len(),
        ids,
    })
}
