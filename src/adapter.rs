//! Keyword-aware tokenizer adapter
//!
//! Wraps a `SubwordSegmenter`, registers the keyword table in its vocabulary
//! once at construction, and exposes `tokenize_with_placeholders`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::{ProcessingOptions, TokenizerConfig};
use crate::error::{Result, TokenizerError};
use crate::keywords::KeywordSet;
use crate::loader::load_tokenizer;
use crate::normalize::{Normalizer, TokenClass};
use crate::segmenter::{HfSegmenter, SubwordSegmenter};

/// Result of `tokenize_with_placeholders`
///
/// `processed` and `classes` are aligned; `actual` is an independent view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedQuery {
    /// Subword tokens with keywords canonicalized and numbers replaced
    pub processed: Vec<String>,
    /// Whitespace-delimited words with keywords canonicalized
    pub actual: Vec<String>,
    /// Class of each entry in `processed`
    pub classes: Vec<TokenClass>,
}

impl TokenizedQuery {
    /// The `(processed, actual)` pair
    pub fn into_pair(self) -> (Vec<String>, Vec<String>) {
        (self.processed, self.actual)
    }
}

/// Tokenizer adapter that canonicalizes SQL keywords and abstracts numbers
pub struct KeywordTokenizer<S = HfSegmenter> {
    segmenter: S,
    normalizer: Normalizer,
}

impl KeywordTokenizer<HfSegmenter> {
    /// Load a pretrained tokenizer with the default SQL keywords and options
    pub fn from_pretrained(identifier: &str) -> Result<Self> {
        let config = TokenizerConfig {
            model: identifier.to_string(),
            ..TokenizerConfig::default()
        };
        Self::from_config(&config)
    }

    /// Load the pretrained tokenizer and keyword table described by `config`
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        let keywords = config.keyword_set()?;
        let tokenizer = load_tokenizer(&config.model, config.revision.as_deref())?;
        Ok(Self::new(
            HfSegmenter::new(tokenizer),
            keywords,
            config.processing.clone(),
        ))
    }
}

impl<S: SubwordSegmenter> KeywordTokenizer<S> {
    /// Wrap `segmenter`, registering every keyword as an added token.
    ///
    /// This is the only point where the vocabulary is mutated.
    pub fn new(mut segmenter: S, keywords: KeywordSet, options: ProcessingOptions) -> Self {
        let added = segmenter.add_tokens(keywords.entries());
        info!(
            "Registered {} keywords ({} new to the vocabulary, vocab size now {})",
            keywords.len(),
            added,
            segmenter.vocab_size()
        );

        let special_tokens = segmenter.special_tokens();
        debug!("Special tokens: {:?}", special_tokens);

        Self {
            normalizer: Normalizer::new(keywords, options, special_tokens),
            segmenter,
        }
    }

    /// Tokenize `text` into the processed subword view and the word view.
    ///
    /// Segmentation errors propagate unchanged. Empty text yields two empty
    /// sequences.
    #[instrument(skip(self), fields(len = text.len()))]
    pub fn tokenize_with_placeholders(&self, text: &str) -> Result<TokenizedQuery> {
        let baseline = self.segmenter.segment(text)?;

        let (classes, processed): (Vec<_>, Vec<_>) =
            self.normalizer.process_tokens(baseline.as_slice()).into_iter().unzip();
        let actual = self.normalizer.process_words(text);

        debug!(
            baseline = baseline.len(),
            processed = processed.len(),
            actual = actual.len(),
            "Tokenized query"
        );

        Ok(TokenizedQuery {
            processed,
            actual,
            classes,
        })
    }

    /// Classify a single raw subword token
    pub fn classify(&self, token: &str) -> (TokenClass, String) {
        self.normalizer.classify(token)
    }

    /// Processed sequence mapped to vocabulary ids.
    ///
    /// Tokens missing from the vocabulary (the placeholder, typically) map to
    /// the unknown token.
    pub fn encode_processed(&self, text: &str) -> Result<Vec<u32>> {
        let query = self.tokenize_with_placeholders(text)?;
        self.ids_for(&query)
    }

    /// Ids of an already tokenized query's processed sequence
    pub fn ids_for(&self, query: &TokenizedQuery) -> Result<Vec<u32>> {
        let unk = &self.normalizer.options().unk_token;

        query
            .processed
            .iter()
            .map(|token| {
                self.segmenter
                    .token_to_id(token)
                    .or_else(|| self.segmenter.token_to_id(unk))
                    .ok_or_else(|| TokenizerError::UnknownToken(token.clone()))
            })
            .collect()
    }

    /// Map ids back to token strings; unknown ids become the unknown token
    pub fn decode_ids(&self, ids: &[u32]) -> Vec<String> {
        let unk = &self.normalizer.options().unk_token;
        ids.iter()
            .map(|&id| self.segmenter.id_to_token(id).unwrap_or_else(|| unk.clone()))
            .collect()
    }

    pub fn keywords(&self) -> &KeywordSet {
        self.normalizer.keywords()
    }

    pub fn placeholder(&self) -> &str {
        &self.normalizer.options().placeholder
    }

    pub fn vocab_size(&self) -> usize {
        self.segmenter.vocab_size()
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }
}
