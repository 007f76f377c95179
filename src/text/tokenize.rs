//! Tokenization shared by the keyword and topic stages.
//!
//! A single tokenizer feeds both pipelines so punctuation and case get
//! identical treatment everywhere: tokens are maximal alphabetic runs,
//! case-folded, kept only when they meet a minimum length.

use crate::error::Result;
use crate::text::Tokenizer;

/// Tokenizer that extracts case-folded alphabetic runs.
///
/// Digits, punctuation, and whitespace all act as separators. Runs
/// shorter than the minimum length are dropped.
///
/// # Examples
///
/// ```
/// use resena::text::{Tokenizer, tokenize::AlphaTokenizer};
///
/// let tokenizer = AlphaTokenizer::new();
///
/// // Short runs ("ok", "a") fall below the default minimum of 3
/// let tokens = tokenizer.tokenize("ok, a SLOW app2").unwrap();
/// assert_eq!(tokens, vec!["slow", "app"]);
///
/// let tokens = tokenizer.tokenize("").unwrap();
/// assert!(tokens.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AlphaTokenizer {
    min_len: usize,
}

impl AlphaTokenizer {
    /// Create a tokenizer with the default minimum token length of 3.
    #[must_use]
    pub fn new() -> Self {
        Self { min_len: 3 }
    }

    /// Set the minimum token length.
    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

impl Default for AlphaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for AlphaTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if ch.is_alphabetic() {
                for folded in ch.to_lowercase() {
                    current.push(folded);
                }
            } else if !current.is_empty() {
                if current.chars().count() >= self.min_len {
                    tokens.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }

        if !current.is_empty() && current.chars().count() >= self.min_len {
            tokens.push(current);
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_runs() {
        let tokenizer = AlphaTokenizer::new();
        let tokens = tokenizer.tokenize("fast transfer works").expect("tokenize");
        assert_eq!(tokens, vec!["fast", "transfer", "works"]);
    }

    #[test]
    fn test_case_folding() {
        let tokenizer = AlphaTokenizer::new();
        let tokens = tokenizer.tokenize("GREAT App").expect("tokenize");
        assert_eq!(tokens, vec!["great", "app"]);
    }

    #[test]
    fn test_digits_split_runs() {
        let tokenizer = AlphaTokenizer::new();
        let tokens = tokenizer.tokenize("app2023version").expect("tokenize");
        assert_eq!(tokens, vec!["app", "version"]);
    }

    #[test]
    fn test_min_len_filter() {
        let tokenizer = AlphaTokenizer::new();
        let tokens = tokenizer.tokenize("it is ok but slow").expect("tokenize");
        assert_eq!(tokens, vec!["but", "slow"]);
    }

    #[test]
    fn test_custom_min_len() {
        let tokenizer = AlphaTokenizer::new().with_min_len(1);
        let tokens = tokenizer.tokenize("a bc def").expect("tokenize");
        assert_eq!(tokens, vec!["a", "bc", "def"]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = AlphaTokenizer::new();
        assert!(tokenizer.tokenize("").expect("tokenize").is_empty());
        assert!(tokenizer.tokenize("12 34 !!").expect("tokenize").is_empty());
    }
}
