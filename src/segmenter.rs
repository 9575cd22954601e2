//! Subword segmentation seam
//!
//! The keyword tokenizer never segments text itself. It delegates to a
//! `SubwordSegmenter`, which owns the vocabulary and the segmentation model.
//! `HfSegmenter` is the production implementation backed by the HuggingFace
//! `tokenizers` crate; tests substitute lightweight fakes.

use tokenizers::{AddedToken, Tokenizer};

use crate::error::{Result, TokenizerError};

/// SentencePiece word-start marker (U+2581 LOWER ONE EIGHTH BLOCK)
pub const BOUNDARY_MARKER: char = '\u{2581}';

/// Tokenization primitives supplied by an external tokenizer.
pub trait SubwordSegmenter {
    /// Segment `text` into subword tokens without adding special tokens
    fn segment(&self, text: &str) -> Result<Vec<String>>;

    /// Register tokens in the vocabulary. Returns how many were new.
    fn add_tokens(&mut self, tokens: &[String]) -> usize;

    /// Reserved tokens (padding, end-of-sequence, ...)
    fn special_tokens(&self) -> Vec<String>;

    fn token_to_id(&self, token: &str) -> Option<u32>;

    fn id_to_token(&self, id: u32) -> Option<String>;

    /// Vocabulary size including added tokens
    fn vocab_size(&self) -> usize;
}

/// `SubwordSegmenter` backed by a HuggingFace fast tokenizer
///
/// Holds two copies of the tokenizer. `tokenizer` receives the added tokens
/// and answers every vocabulary query. `segmenting` stays as loaded and does
/// the segmentation, so added tokens are never pulled out of the text: an
/// uppercase `ORDERS` is not split around `OR`, and `GROUP BY` is not
/// extracted as one piece.
pub struct HfSegmenter {
    tokenizer: Tokenizer,
    segmenting: Tokenizer,
}

impl HfSegmenter {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            segmenting: tokenizer.clone(),
            tokenizer,
        }
    }

    /// Borrow the tokenizer carrying the added tokens
    pub fn inner(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

impl From<Tokenizer> for HfSegmenter {
    fn from(tokenizer: Tokenizer) -> Self {
        Self::new(tokenizer)
    }
}

impl SubwordSegmenter for HfSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        let encoding = self
            .segmenting
            .encode(text, false)
            .map_err(|e| TokenizerError::Segmentation(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn add_tokens(&mut self, tokens: &[String]) -> usize {
        let added: Vec<AddedToken> = tokens
            .iter()
            .map(|t| AddedToken::from(t.clone(), false).single_word(true))
            .collect();
        self.tokenizer.add_tokens(&added)
    }

    fn special_tokens(&self) -> Vec<String> {
        let decoder = self.tokenizer.get_added_tokens_decoder();
        let mut specials: Vec<(u32, String)> = decoder
            .iter()
            .filter(|(_, token)| token.special)
            .map(|(id, token)| (*id, token.content.clone()))
            .collect();
        specials.sort_by_key(|(id, _)| *id);
        specials.into_iter().map(|(_, content)| content).collect()
    }

    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.tokenizer.token_to_id(token)
    }

    fn id_to_token(&self, id: u32) -> Option<String> {
        self.tokenizer.id_to_token(id)
    }

    fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/tokenizer.json");

    fn fixture_segmenter() -> HfSegmenter {
        let tokenizer = crate::loader::load_tokenizer(FIXTURE, None).expect("load fixture tokenizer");
        HfSegmenter::new(tokenizer)
    }

    fn with_keywords(keywords: &[&str]) -> HfSegmenter {
        let mut segmenter = fixture_segmenter();
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        segmenter.add_tokens(&keywords);
        segmenter
    }

    #[test]
    fn test_keywords_are_not_extracted_inside_words() {
        let segmenter = with_keywords(&["OR", "AS", "SET"]);

        let tokens = segmenter.segment("ORDERS ASSET").unwrap();
        assert_eq!(tokens, vec!["\u{2581}ORDERS", "\u{2581}ASSET"]);
    }

    #[test]
    fn test_phrase_keyword_is_not_segmented_as_one_token() {
        let segmenter = with_keywords(&["GROUP BY"]);

        let tokens = segmenter.segment("GROUP BY a").unwrap();
        assert_eq!(tokens, vec!["\u{2581}GROUP", "\u{2581}BY", "\u{2581}a"]);
        assert!(segmenter.token_to_id("GROUP BY").is_some());
    }

    #[test]
    fn test_special_tokens_come_from_added_token_decoder() {
        let segmenter = with_keywords(&["SELECT", "WHERE"]);

        assert_eq!(segmenter.special_tokens(), vec!["<pad>", "</s>", "<unk>"]);
        assert_eq!(segmenter.segment("</s>").unwrap(), vec!["</s>"]);
    }

    #[test]
    fn test_fixture_added_tokens_map_to_fresh_ids() {
        let mut segmenter = fixture_segmenter();
        let before = segmenter.vocab_size();

        let added = segmenter.add_tokens(&["WHERE".to_string(), "GROUP BY".to_string()]);

        assert_eq!(added, 2);
        assert_eq!(segmenter.vocab_size(), before + 2);
        let id = segmenter.token_to_id("WHERE").unwrap();
        assert_eq!(segmenter.id_to_token(id).as_deref(), Some("WHERE"));
        assert_ne!(segmenter.token_to_id("\u{2581}WHERE"), Some(id));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_t5_segments_with_boundary_marker() {
        let tokenizer = crate::loader::load_tokenizer("t5-base", None).expect("load t5-base");
        let segmenter = HfSegmenter::new(tokenizer);

        let tokens = segmenter.segment("hello world").unwrap();
        assert!(!tokens.is_empty());
        assert!(tokens[0].starts_with(BOUNDARY_MARKER));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_t5_special_tokens_include_eos_and_pad() {
        let tokenizer = crate::loader::load_tokenizer("t5-base", None).expect("load t5-base");
        let segmenter = HfSegmenter::new(tokenizer);

        let specials = segmenter.special_tokens();
        assert!(specials.iter().any(|t| t == "</s>"));
        assert!(specials.iter().any(|t| t == "<pad>"));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_added_tokens_grow_vocabulary() {
        let tokenizer = crate::loader::load_tokenizer("t5-base", None).expect("load t5-base");
        let mut segmenter = HfSegmenter::new(tokenizer);
        let before = segmenter.vocab_size();

        let added = segmenter.add_tokens(&["GROUP BY".to_string()]);

        assert_eq!(added, 1);
        assert_eq!(segmenter.vocab_size(), before + 1);
        assert!(segmenter.token_to_id("GROUP BY").is_some());
    }
}
