//! Text normalizer and whitespace tokenizer
//!
//! Lowercases input and keeps ASCII letters/digits plus one secondary script
//! block (Tamil by default). Everything else becomes a separator.

use ahash::AHashSet;
use std::ops::RangeInclusive;

/// Tamil Unicode block
pub const TAMIL: RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

/// Normalizing tokenizer shared by queries and restaurant text
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Extra script block kept alongside `a-z0-9`
    pub secondary: Option<RangeInclusive<char>>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            secondary: Some(TAMIL),
        }
    }
}

impl Tokenizer {
    /// Create a tokenizer with a custom secondary script range
    pub fn new(secondary: Option<RangeInclusive<char>>) -> Self {
        Self { secondary }
    }

    fn keeps(&self, c: char) -> bool {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || self.secondary.as_ref().is_some_and(|r| r.contains(&c))
    }

    /// Lowercase, replace disallowed characters with spaces, collapse whitespace
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pending_space = false;

        for c in text.chars().flat_map(char::to_lowercase) {
            if self.keeps(c) {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            } else {
                pending_space = true;
            }
        }
        out
    }

    /// Tokenize text into terms, duplicates kept in order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Tokenize text into distinct terms
    pub fn token_set(&self, text: &str) -> AHashSet<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
