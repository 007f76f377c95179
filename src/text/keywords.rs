//! Frequency-based keyword and phrase extraction.
//!
//! Extracts the most frequent single words and two-word phrases from a
//! slice of review texts, after stop word filtering. Bigrams are formed
//! only from tokens that survive filtering and sit adjacent in the
//! filtered sequence, so no phrase spans a removed stop word.
//!
//! # Quick Start
//!
//! ```
//! use resena::text::keywords::KeywordExtractor;
//! use resena::text::stopwords::StopWordsFilter;
//!
//! let extractor = KeywordExtractor::new(StopWordsFilter::review_domain());
//! let texts = vec!["fast transfer works", "fast transfer again"];
//!
//! let words = extractor.top_words(&texts, 2).unwrap();
//! assert_eq!(words[0], ("fast".to_string(), 2));
//!
//! let phrases = extractor.top_phrases(&texts, 1).unwrap();
//! assert_eq!(phrases[0], ("fast transfer".to_string(), 2));
//! ```

use std::collections::HashMap;

use crate::error::Result;
use crate::text::stopwords::StopWordsFilter;
use crate::text::tokenize::AlphaTokenizer;
use crate::text::Tokenizer;

/// Minimum token length for keyword and phrase constituents.
const MIN_TOKEN_LEN: usize = 3;

/// Extractor for top words and top phrases over a set of texts.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    tokenizer: AlphaTokenizer,
    stop_words: StopWordsFilter,
}

impl KeywordExtractor {
    /// Create an extractor with the given stop word filter.
    #[must_use]
    pub fn new(stop_words: StopWordsFilter) -> Self {
        Self {
            tokenizer: AlphaTokenizer::new().with_min_len(MIN_TOKEN_LEN),
            stop_words,
        }
    }

    /// Tokenize every text in order and drop stop words, yielding one
    /// concatenated token sequence.
    fn filtered_tokens<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>> {
        let mut all = Vec::new();
        for text in texts {
            let tokens = self.tokenizer.tokenize(text.as_ref())?;
            all.extend(self.stop_words.filter_owned(tokens));
        }
        Ok(all)
    }

    /// Count items preserving first-seen order for deterministic ties.
    fn count_ranked<I: Iterator<Item = String>>(items: I) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (pos, item) in items.enumerate() {
            let entry = counts.entry(item).or_insert((0, pos));
            entry.0 += 1;
        }
        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(item, (count, first))| (item, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));
        ranked.into_iter().map(|(item, count, _)| (item, count)).collect()
    }

    /// Top-n single words by descending frequency.
    ///
    /// Ties break by first occurrence in the input. Empty input yields an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use resena::text::keywords::KeywordExtractor;
    /// use resena::text::stopwords::StopWordsFilter;
    ///
    /// let extractor = KeywordExtractor::new(StopWordsFilter::review_domain());
    /// let texts = vec!["slow slow loading", "loading"];
    /// let words = extractor.top_words(&texts, 10).unwrap();
    /// assert_eq!(words, vec![("slow".to_string(), 2), ("loading".to_string(), 2)]);
    /// ```
    pub fn top_words<S: AsRef<str>>(&self, texts: &[S], n: usize) -> Result<Vec<(String, usize)>> {
        let tokens = self.filtered_tokens(texts)?;
        let mut ranked = Self::count_ranked(tokens.into_iter());
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Top-n two-word phrases by descending frequency.
    ///
    /// Candidates are scanned in descending-frequency order (first-seen
    /// order on ties) and kept when both constituent words individually
    /// pass the length and stop word filters; the scan continues until n
    /// phrases qualify or the candidates run out, so fewer than n are
    /// returned only on true exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization fails.
    pub fn top_phrases<S: AsRef<str>>(
        &self,
        texts: &[S],
        n: usize,
    ) -> Result<Vec<(String, usize)>> {
        let tokens = self.filtered_tokens(texts)?;
        if tokens.len() < 2 {
            return Ok(Vec::new());
        }

        let bigrams = tokens.windows(2).map(|pair| pair.join(" "));
        let ranked = Self::count_ranked(bigrams);

        let mut qualifying = Vec::with_capacity(n.min(ranked.len()));
        for (phrase, count) in ranked {
            if qualifying.len() >= n {
                break;
            }
            if self.phrase_qualifies(&phrase) {
                qualifying.push((phrase, count));
            }
        }
        Ok(qualifying)
    }

    /// Both constituent words must pass the length and stop word filters.
    fn phrase_qualifies(&self, phrase: &str) -> bool {
        phrase
            .split(' ')
            .all(|w| w.len() >= MIN_TOKEN_LEN && !self.stop_words.is_stop_word(w))
    }
}
