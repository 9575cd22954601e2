//! SQL keyword vocabulary
//!
//! A `KeywordSet` is an immutable table of canonical (uppercase) keyword
//! entries. Entries may be single words (`WHERE`) or phrases (`GROUP BY`);
//! phrases are stored with single-space separators.
//!
//! Two lookups exist because the two normalization passes compare differently:
//! - subword tokens are compared case-insensitively (lowercase folding)
//! - whole words are uppercased and compared against the canonical entries

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Result, TokenizerError};

/// Default SQL keyword table, in registration order.
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "COUNT",
    "AND",
    "OR",
    "GROUP BY",
    "ORDER BY",
    "INSERT",
    "UPDATE",
    "DELETE",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
    "HAVING",
    "DISTINCT",
    "LIKE",
    "IN",
    "BETWEEN",
    "AS",
    "CREATE",
    "ALTER",
    "DROP",
    "TABLE",
    "VIEW",
    "INDEX",
    "DATABASE",
    "SET",
    "VALUES",
    "RETURNING",
    "UNION",
    "EXCEPT",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "NULL",
    "NOT",
    "IS",
    "EXISTS",
    "LIMIT",
    "OFFSET",
    "FETCH",
    "WITH",
    "ROLLBACK",
    "COMMIT",
    "TRANSACTION",
    "GRANT",
    "REVOKE",
    "USE",
    "CHECK",
    "DEFAULT",
    "PRIMARY KEY",
    "FOREIGN KEY",
    "UNIQUE",
    "INSERT INTO",
    "SELECT DISTINCT",
];

static SQL_KEYWORD_SET: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::from_canonical(SQL_KEYWORDS));

/// Immutable, case-insensitive keyword table
#[derive(Debug, Clone)]
pub struct KeywordSet {
    entries: Vec<String>,
    /// lowercase form -> index into `entries`
    by_lower: HashMap<String, usize>,
    /// canonical uppercase form -> index into `entries`
    by_upper: HashMap<String, usize>,
    max_phrase_words: usize,
}

impl KeywordSet {
    /// The default SQL keyword table
    pub fn sql() -> Self {
        SQL_KEYWORD_SET.clone()
    }

    /// Build a keyword set from arbitrary entries.
    ///
    /// Entries are trimmed, internal whitespace is collapsed to a single space
    /// and the result is uppercased. Duplicates (after canonicalization) keep
    /// their first position. Blank entries are rejected.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            let normalized = canonicalize(entry);
            if normalized.is_empty() {
                return Err(TokenizerError::InvalidKeyword(entry.to_string()));
            }
            canonical.push(normalized);
        }
        Ok(Self::build(canonical))
    }

    /// Return a new set with `extra` appended after the current entries
    pub fn extended<I, S>(&self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let more = Self::new(extra)?;
        let merged = self.entries.iter().chain(more.entries.iter()).cloned();
        Ok(Self::build(merged.collect()))
    }

    fn from_canonical(entries: &[&str]) -> Self {
        Self::build(entries.iter().map(|e| canonicalize(e)).collect())
    }

    fn build(canonical: Vec<String>) -> Self {
        let mut entries = Vec::with_capacity(canonical.len());
        let mut by_lower = HashMap::new();
        let mut by_upper = HashMap::new();
        let mut max_phrase_words = 0;

        for entry in canonical {
            if by_upper.contains_key(&entry) {
                continue;
            }
            let index = entries.len();
            by_lower.entry(entry.to_lowercase()).or_insert(index);
            by_upper.insert(entry.clone(), index);
            max_phrase_words = max_phrase_words.max(entry.split(' ').count());
            entries.push(entry);
        }

        Self {
            entries,
            by_lower,
            by_upper,
            max_phrase_words,
        }
    }

    /// Canonical entries in registration order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Word count of the longest entry (1 when there are no phrases)
    pub fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    /// Case-insensitive match of a cleaned subword token.
    ///
    /// Returns the canonical entry when `candidate` equals an entry ignoring case.
    pub fn match_token(&self, candidate: &str) -> Option<&str> {
        self.by_lower
            .get(&candidate.to_lowercase())
            .map(|&i| self.entries[i].as_str())
    }

    /// Match of a whitespace-delimited word by its uppercase form
    pub fn match_word(&self, word: &str) -> Option<&str> {
        self.by_upper
            .get(&word.to_uppercase())
            .map(|&i| self.entries[i].as_str())
    }

    /// True if `candidate` matches any entry ignoring case
    pub fn contains(&self, candidate: &str) -> bool {
        self.match_token(candidate).is_some()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::sql()
    }
}

impl PartialEq for KeywordSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for KeywordSet {}

fn canonicalize(entry: &str) -> String {
    entry
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
