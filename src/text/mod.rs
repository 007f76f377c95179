//! Text processing for review analytics.
//!
//! This module provides the shared text capabilities used by every
//! downstream stage:
//! - [`normalize`]: deterministic cleanup of raw review text
//! - [`tokenize`]: alphabetic-run tokenization shared by the keyword and
//!   topic stages
//! - [`stopwords`]: language-level and review-domain stop word filtering
//! - [`stem`]: light suffix stemming for topic preprocessing
//! - [`keywords`]: frequency-based word and phrase extraction
//!
//! Tokenization and stop word handling live here, in one place, so the
//! keyword and topic pipelines treat punctuation and case identically.

pub mod keywords;
pub mod normalize;
pub mod stem;
pub mod stopwords;
pub mod tokenize;

use crate::error::Result;

/// Trait for tokenization strategies.
///
/// # Examples
///
/// ```
/// use resena::text::{Tokenizer, tokenize::AlphaTokenizer};
///
/// let tokenizer = AlphaTokenizer::new();
/// let tokens = tokenizer.tokenize("Great app, fast transfer!").unwrap();
/// assert_eq!(tokens, vec!["great", "app", "fast", "transfer"]);
/// ```
pub trait Tokenizer {
    /// Split text into tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization fails.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}
