//! Token normalization
//!
//! Two independent passes over the same input:
//!
//! ```text
//! subword tokens ──► strip marker ──► classify ──► processed sequence
//!                                      │
//!                                      ├─ keyword  → canonical uppercase entry
//!                                      ├─ numeric  → placeholder
//!                                      ├─ special  → unchanged
//!                                      └─ plain    → unchanged
//!
//! raw text ──► whitespace split ──► keyword uppercase ──► actual sequence
//! ```
//!
//! The sequences are not aligned with each other.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{PhraseMatching, ProcessingOptions};
use crate::keywords::KeywordSet;

/// How a processed token was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Keyword,
    Numeric,
    Special,
    Plain,
}

/// Classification rules bound to one keyword table and vocabulary
#[derive(Debug, Clone)]
pub struct Normalizer {
    keywords: KeywordSet,
    options: ProcessingOptions,
    special_tokens: HashSet<String>,
}

impl Normalizer {
    pub fn new(
        keywords: KeywordSet,
        options: ProcessingOptions,
        special_tokens: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            keywords,
            options,
            special_tokens: special_tokens.into_iter().collect(),
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    pub fn is_special(&self, token: &str) -> bool {
        self.special_tokens.contains(token)
    }

    /// Strip every leading boundary marker
    pub fn clean<'a>(&self, token: &'a str) -> &'a str {
        token.trim_start_matches(self.options.boundary_marker)
    }

    /// Classify one raw subword token
    pub fn classify(&self, token: &str) -> (TokenClass, String) {
        let cleaned = self.clean(token);

        if let Some(keyword) = self.keywords.match_token(cleaned) {
            (TokenClass::Keyword, keyword.to_string())
        } else if is_numeric(cleaned) {
            (TokenClass::Numeric, self.options.placeholder.clone())
        } else if self.is_special(cleaned) {
            (TokenClass::Special, cleaned.to_string())
        } else {
            (TokenClass::Plain, cleaned.to_string())
        }
    }

    /// Normalize a subword token sequence
    pub fn process_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<(TokenClass, String)> {
        let mut processed = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            if let Some((phrase, consumed)) = self.match_token_phrase(tokens, i) {
                processed.push((TokenClass::Keyword, phrase));
                i += consumed;
                continue;
            }

            processed.push(self.classify(tokens[i].as_ref()));
            i += 1;
        }

        processed
    }

    /// Normalize the whitespace-delimited words of `text`
    pub fn process_words(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut processed = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            if let Some((phrase, consumed)) = self.match_word_phrase(&words, i) {
                processed.push(phrase);
                i += consumed;
                continue;
            }

            let word = words[i];
            match self.keywords.match_word(word) {
                Some(keyword) => processed.push(keyword.to_string()),
                None => processed.push(word.to_string()),
            }
            i += 1;
        }

        processed
    }

    /// Longest phrase entry spelled by tokens starting at `start`.
    ///
    /// Every token after the first must open a new word (carry the boundary
    /// marker), so a phrase never ends inside a word.
    fn match_token_phrase<S: AsRef<str>>(&self, tokens: &[S], start: usize) -> Option<(String, usize)> {
        if self.options.phrase_matching == PhraseMatching::Disabled {
            return None;
        }

        let max = self.keywords.max_phrase_words().min(tokens.len() - start);
        for width in (2..=max).rev() {
            let window = &tokens[start..start + width];
            let opens_words = window[1..]
                .iter()
                .all(|t| t.as_ref().starts_with(self.options.boundary_marker));
            if !opens_words {
                continue;
            }

            let phrase = window
                .iter()
                .map(|t| self.clean(t.as_ref()))
                .collect::<Vec<_>>()
                .join(" ");
            if let Some(keyword) = self.keywords.match_token(&phrase) {
                return Some((keyword.to_string(), width));
            }
        }

        None
    }

    fn match_word_phrase(&self, words: &[&str], start: usize) -> Option<(String, usize)> {
        if self.options.phrase_matching == PhraseMatching::Disabled {
            return None;
        }

        let max = self.keywords.max_phrase_words().min(words.len() - start);
        for width in (2..=max).rev() {
            let phrase = words[start..start + width].join(" ");
            if let Some(keyword) = self.keywords.match_word(&phrase) {
                return Some((keyword.to_string(), width));
            }
        }

        None
    }
}

/// Non-empty and every character numeric (Unicode `Nd`, `Nl`, `No`)
///
/// Ideographic numerals such as `三` are letters (`Lo`) and do not count.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}
