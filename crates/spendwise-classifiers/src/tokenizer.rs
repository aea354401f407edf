//! Word tokenizer shared by fitting and transforming

use regex::Regex;
use spendwise_core::{Error, Result};

/// Words of two or more word characters; shorter words and punctuation are dropped
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Case-insensitive word tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Create a tokenizer with the default token pattern
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::internal(format!("Failed to compile token regex: {e}")))?;
        Ok(Self { pattern })
    }

    /// Lowercase the text and split it into tokens, in order of appearance
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new().expect("Failed to create tokenizer")
    }
}
