//! Offline segmenter for integration tests
//!
//! Mimics SentencePiece output closely enough for the normalization rules:
//! each whitespace word is split into letter runs, digit runs and single
//! punctuation characters, and the first piece of every word carries the
//! boundary marker.

#![allow(dead_code)]

use std::collections::BTreeMap;

use sql_keyword_tokenizer::{
    error::Result, KeywordSet, KeywordTokenizer, ProcessingOptions, SubwordSegmenter,
    BOUNDARY_MARKER,
};

pub const SPECIAL_TOKENS: &[&str] = &["<pad>", "</s>", "<unk>"];

pub struct PieceSegmenter {
    vocab: BTreeMap<String, u32>,
}

impl PieceSegmenter {
    pub fn new() -> Self {
        let vocab = SPECIAL_TOKENS
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i as u32))
            .collect();
        Self { vocab }
    }
}

#[derive(PartialEq)]
enum Run {
    Letters,
    Digits,
    Other,
}

fn run_of(c: char) -> Run {
    if c.is_ascii_digit() {
        Run::Digits
    } else if c.is_alphabetic() || c == '_' {
        Run::Letters
    } else {
        Run::Other
    }
}

fn split_word(word: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_run: Option<Run> = None;

    for c in word.chars() {
        let run = run_of(c);
        let extends = matches!(&current_run, Some(r) if *r == run && run != Run::Other);
        if !extends && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(c);
        current_run = Some(run);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

impl SubwordSegmenter for PieceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            // Special tokens are emitted whole, like added tokens in a real tokenizer
            if SPECIAL_TOKENS.contains(&word) {
                tokens.push(word.to_string());
                continue;
            }
            for (i, piece) in split_word(word).into_iter().enumerate() {
                if i == 0 {
                    tokens.push(format!("{BOUNDARY_MARKER}{piece}"));
                } else {
                    tokens.push(piece);
                }
            }
        }
        Ok(tokens)
    }

    fn add_tokens(&mut self, tokens: &[String]) -> usize {
        let mut added = 0;
        for token in tokens {
            if !self.vocab.contains_key(token) {
                let id = self.vocab.len() as u32;
                self.vocab.insert(token.clone(), id);
                added += 1;
            }
        }
        added
    }

    fn special_tokens(&self) -> Vec<String> {
        SPECIAL_TOKENS.iter().map(|t| t.to_string()).collect()
    }

    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    fn id_to_token(&self, id: u32) -> Option<String> {
        self.vocab
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.clone())
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len()
    }
}

pub fn sql_tokenizer() -> KeywordTokenizer<PieceSegmenter> {
    tokenizer_with(ProcessingOptions::default())
}

pub fn tokenizer_with(options: ProcessingOptions) -> KeywordTokenizer<PieceSegmenter> {
    KeywordTokenizer::new(PieceSegmenter::new(), KeywordSet::sql(), options)
}
