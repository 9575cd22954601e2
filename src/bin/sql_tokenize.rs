//! SQL keyword tokenizer CLI
//!
//! Tokenizes a query with the keyword-aware tokenizer and prints both views.
//!
//! # Usage
//!
//! ```bash
//! # Tokenize the built-in sample query with t5-base
//! sql_tokenize
//!
//! # Tokenize your own query
//! sql_tokenize "SELECT count(*) FROM orders WHERE total > 100"
//!
//! # Read from stdin, JSON output, with ids
//! echo "select 1" | sql_tokenize --stdin --format json --ids
//!
//! # Use a local tokenizer and a YAML config
//! sql_tokenize --model ./models/t5-small --config tokenizer.yaml "drop table t"
//! ```
//!
//! Set `RUST_LOG=debug` to see loading and per-call logs on stderr.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sql_keyword_tokenizer::{KeywordTokenizer, PhraseMatching, TokenizerConfig};

const SAMPLE_QUERY: &str = "select name, age FROM employees WHERE age > 30";

#[derive(Parser)]
#[command(name = "sql_tokenize")]
#[command(version)]
#[command(about = "Tokenize SQL-like text with keyword canonicalization and numeric placeholders")]
#[command(long_about = None)]
struct Cli {
    /// Text to tokenize (defaults to a sample query)
    text: Option<String>,

    /// Read the text from stdin instead
    #[arg(long, conflicts_with = "text")]
    stdin: bool,

    /// Hub model id or local tokenizer path
    #[arg(long, short, env = "SQL_TOKENIZER_MODEL")]
    model: Option<String>,

    /// YAML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the numeric placeholder
    #[arg(long)]
    placeholder: Option<String>,

    /// Match multi-word keywords (GROUP BY, INSERT INTO, ...)
    #[arg(long)]
    phrase_matching: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    format: OutputFormat,

    /// Also print vocabulary ids of the processed tokens
    #[arg(long)]
    ids: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let text = if cli.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        cli.text.clone().unwrap_or_else(|| SAMPLE_QUERY.to_string())
    };

    let tokenizer = KeywordTokenizer::from_config(&config)
        .with_context(|| format!("Failed to load tokenizer '{}'", config.model))?;
    info!("Tokenizer ready: {} keywords", tokenizer.keywords().len());

    let query = tokenizer.tokenize_with_placeholders(&text)?;
    let ids = if cli.ids {
        Some(tokenizer.ids_for(&query)?)
    } else {
        None
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Tokenized with placeholders: {:?}", query.processed);
            println!("Actual query tokenized: {:?}", query.actual);
            if let Some(ids) = ids {
                println!("Processed token ids: {:?}", ids);
            }
        }
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&query)?;
            if let Some(ids) = ids {
                value["ids"] = serde_json::json!(ids);
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

/// Layer CLI flags over the YAML config (or defaults)
fn build_config(cli: &Cli) -> Result<TokenizerConfig> {
    let mut config = match &cli.config {
        Some(path) => TokenizerConfig::from_yaml_file(path)?,
        None => TokenizerConfig::default(),
    };

    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(placeholder) = &cli.placeholder {
        config.processing.placeholder = placeholder.clone();
    }
    if cli.phrase_matching {
        config.processing.phrase_matching = PhraseMatching::Lookahead;
    }

    Ok(config)
}
