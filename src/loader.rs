//! Pretrained tokenizer loading
//!
//! An identifier resolves, in order, to:
//! 1. a local `tokenizer.json` file
//! 2. a local directory containing `tokenizer.json`
//! 3. a HuggingFace Hub model repo (downloaded into ~/.cache/huggingface)

use std::path::{Path, PathBuf};

use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::error::{Result, TokenizerError};

/// File name of a serialized fast tokenizer
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Load a pretrained tokenizer by hub id or local path
pub fn load_tokenizer(identifier: &str, revision: Option<&str>) -> Result<Tokenizer> {
    info!("Loading pretrained tokenizer: {}", identifier);

    let path = resolve_tokenizer_file(identifier, revision)?;
    debug!("Tokenizer file resolved to {}", path.display());

    let tokenizer = Tokenizer::from_file(&path)
        .map_err(|e| TokenizerError::external_load(identifier, format!("{}: {}", path.display(), e)))?;

    info!(
        "Tokenizer loaded ({} entries in vocabulary)",
        tokenizer.get_vocab_size(true)
    );
    Ok(tokenizer)
}

/// Map an identifier to a `tokenizer.json` on disk, downloading if needed
pub fn resolve_tokenizer_file(identifier: &str, revision: Option<&str>) -> Result<PathBuf> {
    if identifier.trim().is_empty() {
        return Err(TokenizerError::external_load(identifier, "empty model identifier"));
    }

    let local = Path::new(identifier);
    if local.is_file() {
        return Ok(local.to_path_buf());
    }
    if local.is_dir() {
        let candidate = local.join(TOKENIZER_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(TokenizerError::external_load(
            identifier,
            format!("directory has no {}", TOKENIZER_FILE),
        ));
    }

    fetch_from_hub(identifier, revision)
}

fn fetch_from_hub(repo_id: &str, revision: Option<&str>) -> Result<PathBuf> {
    debug!("Fetching {} from HuggingFace Hub", repo_id);

    let api = Api::new().map_err(|e| {
        TokenizerError::external_load(repo_id, format!("failed to create HuggingFace API client: {}", e))
    })?;

    let repo = match revision {
        Some(rev) => Repo::with_revision(repo_id.to_string(), RepoType::Model, rev.to_string()),
        None => Repo::new(repo_id.to_string(), RepoType::Model),
    };

    api.repo(repo).get(TOKENIZER_FILE).map_err(|e| {
        TokenizerError::external_load(repo_id, format!("failed to download {}: {}", TOKENIZER_FILE, e))
    })
}
