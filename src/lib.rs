//! SQL Keyword Tokenizer
//!
//! Wraps a pretrained seq2seq tokenizer (t5-base by default) for text-to-SQL
//! pipelines. SQL keywords are registered as added vocabulary tokens, and
//! every tokenization yields two views of the input.
//!
//! # Architecture
//!
//! ```text
//! "select name FROM t WHERE age > 30"
//!       │
//!       ├──────────────────────────────┐
//!       ▼                              ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │  SubwordSegmenter        │  │  Whitespace split        │
//! │  (HF tokenizers)         │  │                          │
//! │  ▁select ▁name ... ▁30   │  │  select name ... 30      │
//! └──────────────────────────┘  └──────────────────────────┘
//!       │                              │
//!       ▼                              ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │  Normalizer              │  │  Normalizer              │
//! │  keyword → UPPERCASE     │  │  keyword → UPPERCASE     │
//! │  number  → <value>       │  │  everything else as-is   │
//! └──────────────────────────┘  └──────────────────────────┘
//!       │                              │
//!       ▼                              ▼
//!   processed                        actual
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sql_keyword_tokenizer::KeywordTokenizer;
//!
//! let tokenizer = KeywordTokenizer::from_pretrained("t5-base")?;
//! let query = tokenizer.tokenize_with_placeholders("select name FROM t WHERE age > 30")?;
//! println!("{:?}", query.processed);
//! println!("{:?}", query.actual);
//! # Ok::<(), sql_keyword_tokenizer::TokenizerError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod keywords;
pub mod loader;
pub mod normalize;
pub mod segmenter;

pub use adapter::{KeywordTokenizer, TokenizedQuery};
pub use config::{PhraseMatching, ProcessingOptions, TokenizerConfig};
pub use error::TokenizerError;
pub use keywords::{KeywordSet, SQL_KEYWORDS};
pub use normalize::TokenClass;
pub use segmenter::{HfSegmenter, SubwordSegmenter, BOUNDARY_MARKER};
