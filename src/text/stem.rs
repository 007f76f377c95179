//! Suffix stemming for topic preprocessing.
//!
//! Folds inflected review vocabulary ("crashes", "crashing", "crashed")
//! onto shared stems before vectorization, so document frequencies
//! accumulate per concept instead of per surface form.
//!
//! # Examples
//!
//! ```
//! use resena::text::stem::{LightStemmer, Stemmer};
//!
//! let stemmer = LightStemmer::new();
//! assert_eq!(stemmer.stem("crashes").unwrap(), "crash");
//! assert_eq!(stemmer.stem("loading").unwrap(), "load");
//! assert_eq!(stemmer.stem("constantly").unwrap(), "constant");
//! ```

use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer {
    /// Stem a single word.
    ///
    /// # Errors
    ///
    /// Returns an error if stemming fails.
    fn stem(&self, word: &str) -> Result<String>;

    /// Stem a sequence of tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if stemming any token fails.
    fn stem_tokens(&self, tokens: &[String]) -> Result<Vec<String>> {
        tokens.iter().map(|t| self.stem(t)).collect()
    }
}

/// Rule-based suffix stripper for English review text.
///
/// Handles plural forms and the common verbal/adverbial suffixes that
/// dominate review vocabulary. Words of three characters or fewer pass
/// through untouched, and no rule fires when it would leave a stem
/// shorter than three characters.
///
/// # Examples
///
/// ```
/// use resena::text::stem::{LightStemmer, Stemmer};
///
/// let stemmer = LightStemmer::new();
/// assert_eq!(stemmer.stem("transfers").unwrap(), "transfer");
/// assert_eq!(stemmer.stem("studies").unwrap(), "study");
/// assert_eq!(stemmer.stem("fast").unwrap(), "fast");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LightStemmer;

impl LightStemmer {
    /// Create a new stemmer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn strip_plural(word: &str) -> String {
        if word.len() <= 3 {
            return word.to_string();
        }
        if let Some(base) = word.strip_suffix("ies") {
            if base.len() >= 2 {
                return format!("{base}y");
            }
        }
        for sibilant in ["sses", "shes", "ches", "xes", "zes", "oes"] {
            if word.ends_with(sibilant) && word.len() - 2 >= 3 {
                return word[..word.len() - 2].to_string();
            }
        }
        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }

    fn strip_suffix(word: &str) -> String {
        for suffix in ["ing", "ed", "ly"] {
            if let Some(base) = word.strip_suffix(suffix) {
                if base.len() >= 3 {
                    return base.to_string();
                }
            }
        }
        word.to_string()
    }
}

impl Stemmer for LightStemmer {
    fn stem(&self, word: &str) -> Result<String> {
        let singular = Self::strip_plural(word);
        Ok(Self::strip_suffix(&singular))
    }
}
