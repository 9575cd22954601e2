//! Tokenizer configuration
//!
//! Loads `TokenizerConfig` from YAML. Every field has a default, so an empty
//! document (or no file at all) yields the stock t5-base + SQL setup:
//!
//! ```yaml
//! model: t5-base
//! placeholder: "<value>"
//! phrase_matching: lookahead
//! extra_keywords: [ILIKE, "ON CONFLICT"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TokenizerError};
use crate::keywords::KeywordSet;
use crate::segmenter::BOUNDARY_MARKER;

/// HuggingFace Hub repo used when no model is configured
pub const DEFAULT_MODEL: &str = "t5-base";

/// Substitute emitted for numeric subword tokens
pub const DEFAULT_PLACEHOLDER: &str = "<value>";

/// SentencePiece unknown token used by T5 vocabularies
pub const DEFAULT_UNK_TOKEN: &str = "<unk>";

/// How multi-word keyword entries (`GROUP BY`) are treated.
///
/// `Disabled` keeps the historical behavior: phrase entries are registered
/// in the vocabulary but never matched, since matching runs on single tokens
/// and single words. `Lookahead` adds greedy longest-match over consecutive
/// tokens/words and emits the phrase as one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseMatching {
    #[default]
    Disabled,
    Lookahead,
}

/// Per-token processing options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    pub placeholder: String,
    pub boundary_marker: char,
    pub unk_token: String,
    pub phrase_matching: PhraseMatching,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            boundary_marker: BOUNDARY_MARKER,
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
            phrase_matching: PhraseMatching::Disabled,
        }
    }
}

/// Full tokenizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Hub repo id, local `tokenizer.json`, or a directory containing one
    pub model: String,

    /// Hub revision (branch, tag or commit); ignored for local paths
    pub revision: Option<String>,

    /// Replaces the default SQL keyword table when set
    pub keywords: Option<Vec<String>>,

    /// Appended to the keyword table
    pub extra_keywords: Vec<String>,

    #[serde(flatten)]
    pub processing: ProcessingOptions,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            revision: None,
            keywords: None,
            extra_keywords: Vec::new(),
            processing: ProcessingOptions::default(),
        }
    }
}

impl TokenizerConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading tokenizer configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| TokenizerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        // An empty document deserializes to unit, not to a defaulted struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| TokenizerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Resolve the keyword table this configuration describes
    pub fn keyword_set(&self) -> Result<KeywordSet> {
        let base = match &self.keywords {
            Some(entries) => KeywordSet::new(entries)?,
            None => KeywordSet::sql(),
        };

        if self.extra_keywords.is_empty() {
            Ok(base)
        } else {
            base.extended(&self.extra_keywords)
        }
    }
}
