//! Stop word filtering for review text.
//!
//! Two lists are provided:
//! - [`ENGLISH_STOP_WORDS`]: language-level function words, used by the
//!   topic-model preprocessing.
//! - [`REVIEW_DOMAIN_STOP_WORDS`]: corpus-generic review terms ("app",
//!   "bank", contracted negations left over from punctuation stripping),
//!   used on top of the English list by the keyword extractor.
//!
//! Corpus-specific terms, such as the entity names themselves, are added
//! at runtime via [`StopWordsFilter::with_extra`].
//!
//! # Examples
//!
//! ```
//! use resena::text::stopwords::StopWordsFilter;
//!
//! let filter = StopWordsFilter::english();
//! let tokens = vec!["the".to_string(), "transfer".to_string(), "was".to_string()];
//! assert_eq!(filter.filter_owned(tokens), vec!["transfer"]);
//! ```

use std::collections::HashSet;

/// Language-level English stop words (function words only).
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "back", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each",
    "even", "ever", "every", "few", "for", "from", "further", "get", "give", "go", "got", "had",
    "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "like", "made", "make",
    "many", "may", "me", "might", "more", "most", "much", "must", "my", "myself", "neither", "no",
    "none", "nor", "not", "now", "of", "off", "on", "once", "one", "only", "or", "other", "ought",
    "our", "ours", "ourselves", "out", "over", "own", "same", "say", "see", "several", "shall",
    "she", "should", "since", "so", "some", "such", "take", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "though",
    "through", "to", "too", "under", "unless", "until", "up", "upon", "very", "was", "way", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Review-domain stop words: terms so frequent in app-store review text
/// that they carry no signal, plus contracted forms whose apostrophes
/// were removed by normalization.
pub const REVIEW_DOMAIN_STOP_WORDS: &[&str] = &[
    "app", "bank", "cant", "doesnt", "dont", "isnt", "please", "really", "still", "thing",
    "things", "use", "used", "using", "well", "wont",
];

/// Stop word filter with O(1) case-insensitive membership checks.
///
/// # Examples
///
/// ```
/// use resena::text::stopwords::StopWordsFilter;
///
/// let filter = StopWordsFilter::review_domain().with_extra(["dashen"]);
/// assert!(filter.is_stop_word("app"));
/// assert!(filter.is_stop_word("Dashen"));
/// assert!(!filter.is_stop_word("transfer"));
/// ```
#[derive(Debug, Clone)]
pub struct StopWordsFilter {
    stop_words: HashSet<String>,
}

impl StopWordsFilter {
    /// Create a filter from custom stop words (stored lowercase).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        Self { stop_words }
    }

    /// Create a filter with the language-level English list.
    #[must_use]
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// Create a filter with the English list plus review-domain terms.
    #[must_use]
    pub fn review_domain() -> Self {
        let mut filter = Self::english();
        filter
            .stop_words
            .extend(REVIEW_DOMAIN_STOP_WORDS.iter().map(|w| (*w).to_string()));
        filter
    }

    /// Add corpus-specific stop words (e.g. the entity names) and return
    /// the extended filter.
    #[must_use]
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Check whether a word is a stop word (case-insensitive).
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        if self.stop_words.contains(word) {
            return true;
        }
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Remove stop words from owned tokens, preserving order.
    ///
    /// # Examples
    ///
    /// ```
    /// use resena::text::stopwords::StopWordsFilter;
    ///
    /// let filter = StopWordsFilter::english();
    /// let tokens = vec!["the".to_string(), "slow".to_string(), "loading".to_string()];
    /// assert_eq!(filter.filter_owned(tokens), vec!["slow", "loading"]);
    /// ```
    #[must_use]
    pub fn filter_owned(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.is_stop_word(t))
            .collect()
    }

    /// Number of stop words in the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// True when the filter holds no stop words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}
