//! Tokenizer capability used during lyric initialization.
//!
//! The converter never tokenizes on its own; callers inject a backend
//! (a morphological analyzer, a syllabifier, ...) through this trait.

use async_trait::async_trait;

use crate::error::Result;

/// Splits line or paragraph text into ordered linguistic units.
#[async_trait]
pub trait Tokenizer: Send + Sync {
    /// Tokenize one line or paragraph of cleaned text.
    async fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Get the name of this tokenizer (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Splits on Unicode whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

#[async_trait]
impl Tokenizer for WhitespaceTokenizer {
    async fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(String::from).collect())
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
