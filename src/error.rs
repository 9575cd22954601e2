//! Error model for the keyword tokenizer.
//!
//! Every failure surfaces immediately to the caller. Nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, configuring or running the tokenizer.
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// The pretrained tokenizer resource could not be located, fetched or parsed.
    #[error("Failed to load pretrained tokenizer '{source_id}': {reason}")]
    ExternalLoad { source_id: String, reason: String },

    /// The underlying subword segmentation failed.
    #[error("Segmentation failed: {0}")]
    Segmentation(String),

    /// A keyword entry was empty or whitespace only.
    #[error("Invalid keyword entry: {0:?}")]
    InvalidKeyword(String),

    /// A token has no id and the vocabulary has no unknown token to fall back to.
    #[error("Token not in vocabulary and no unknown token available: {0}")]
    UnknownToken(String),

    /// A YAML configuration file could not be read or parsed.
    #[error("Invalid configuration {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl TokenizerError {
    pub(crate) fn external_load(source_id: &str, reason: impl ToString) -> Self {
        Self::ExternalLoad {
            source_id: source_id.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = TokenizerError> = std::result::Result<T, E>;
