//! Document-term count vectorization.
//!
//! Builds the count matrix consumed by topic inference from pre-tokenized
//! documents: unigram and bigram terms, document-frequency filtering, and
//! a vocabulary size cap.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::primitives::Matrix;

/// Count vectorizer over pre-tokenized documents.
///
/// Terms are n-grams of the input tokens (bigrams joined with a space).
/// A term enters the vocabulary when its document frequency is at least
/// `min_df` and at most `max_df` as a fraction of documents; the
/// vocabulary is then capped at `max_features` terms by descending total
/// frequency (term order on ties).
///
/// # Examples
///
/// ```
/// use resena::topic::vectorize::CountVectorizer;
///
/// let docs: Vec<Vec<String>> = vec![
///     vec!["transfer".into(), "money".into()],
///     vec!["transfer".into(), "crash".into()],
/// ];
///
/// let mut vectorizer = CountVectorizer::new().with_min_df(2);
/// let dtm = vectorizer.fit_transform(&docs).unwrap();
/// assert_eq!(dtm.shape(), (2, 1));
/// assert_eq!(vectorizer.feature_names(), ["transfer"]);
/// ```
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    min_df: usize,
    max_df: f64,
    max_features: Option<usize>,
    ngram_range: (usize, usize),
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
}

impl CountVectorizer {
    /// Create a vectorizer with unigrams+bigrams and no df filtering.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            ngram_range: (1, 2),
            vocabulary: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Minimum document frequency (absolute count).
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Maximum document frequency as a fraction of documents, in (0, 1].
    #[must_use]
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    /// Vocabulary size cap.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// N-gram range (inclusive).
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n.max(1), max_n.max(1));
        self
    }

    /// Learn the vocabulary and return the document-term count matrix.
    ///
    /// A corpus whose every term is filtered out yields a matrix with
    /// zero columns, which callers treat as the insufficient-data
    /// condition.
    ///
    /// # Errors
    ///
    /// Returns an error if matrix construction fails.
    pub fn fit_transform(&mut self, documents: &[Vec<String>]) -> Result<Matrix> {
        self.fit(documents);
        self.transform(documents)
    }

    /// Learn the vocabulary from the documents.
    pub fn fit(&mut self, documents: &[Vec<String>]) {
        let n_docs = documents.len();
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for tokens in documents {
            let mut doc_terms: HashSet<String> = HashSet::new();
            for term in self.ngrams(tokens) {
                *term_freq.entry(term.clone()).or_insert(0) += 1;
                doc_terms.insert(term);
            }
            for term in doc_terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // max_df bounds the document-frequency *fraction*: a term in df
        // documents passes when df / n_docs <= max_df.
        let max_df_count = (self.max_df * n_docs as f64).floor() as usize;
        let mut sorted: Vec<(String, usize)> = term_freq
            .into_iter()
            .filter(|(term, _)| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                df >= self.min_df && df <= max_df_count
            })
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        if let Some(cap) = self.max_features {
            sorted.truncate(cap);
        }

        self.vocabulary = sorted.into_iter().map(|(term, _)| term).collect();
        self.index = self
            .vocabulary
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
    }

    /// Count learned terms per document.
    ///
    /// # Errors
    ///
    /// Returns an error if matrix construction fails.
    pub fn transform(&self, documents: &[Vec<String>]) -> Result<Matrix> {
        let n_docs = documents.len();
        let vocab_size = self.vocabulary.len();
        let mut data = vec![0.0; n_docs * vocab_size];

        for (doc_idx, tokens) in documents.iter().enumerate() {
            for term in self.ngrams(tokens) {
                if let Some(&term_idx) = self.index.get(&term) {
                    data[doc_idx * vocab_size + term_idx] += 1.0;
                }
            }
        }

        Matrix::from_vec(n_docs, vocab_size, data)
    }

    /// The learned vocabulary, in column order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.vocabulary
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let mut terms = Vec::new();
        for n in self.ngram_range.0..=self.ngram_range.1 {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Vec<String>> {
        texts
            .iter()
            .map(|t| t.split_whitespace().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn test_unigrams_and_bigrams() {
        let mut vectorizer = CountVectorizer::new();
        let dtm = vectorizer
            .fit_transform(&docs(&["transfer money now"]))
            .expect("fit");
        let names = vectorizer.feature_names();
        assert!(names.contains(&"transfer".to_string()));
        assert!(names.contains(&"transfer money".to_string()));
        assert!(names.contains(&"money now".to_string()));
        assert_eq!(dtm.n_rows(), 1);
    }

    #[test]
    fn test_min_df_filters_rare_terms() {
        let mut vectorizer = CountVectorizer::new().with_min_df(2).with_ngram_range(1, 1);
        vectorizer.fit(&docs(&["crash login", "crash balance", "crash"]));
        assert_eq!(vectorizer.feature_names(), ["crash"]);
    }

    #[test]
    fn test_max_df_filters_ubiquitous_terms() {
        // "crash" appears in 3/3 documents; with max_df 0.7 it is dropped.
        let mut vectorizer = CountVectorizer::new().with_max_df(0.7).with_ngram_range(1, 1);
        vectorizer.fit(&docs(&["crash login", "crash balance", "crash transfer"]));
        let names = vectorizer.feature_names();
        assert!(!names.contains(&"crash".to_string()));
        assert!(names.contains(&"login".to_string()));
    }

    #[test]
    fn test_max_features_caps_by_frequency() {
        let mut vectorizer = CountVectorizer::new()
            .with_ngram_range(1, 1)
            .with_max_features(1);
        vectorizer.fit(&docs(&["crash crash login", "crash login", "login"]));
        // "login" and "crash" both appear 3 times total; term order breaks the tie.
        assert_eq!(vectorizer.feature_names().len(), 1);
        assert_eq!(vectorizer.feature_names(), ["crash"]);
    }

    #[test]
    fn test_counts() {
        let mut vectorizer = CountVectorizer::new().with_ngram_range(1, 1);
        let dtm = vectorizer
            .fit_transform(&docs(&["crash crash login", "login"]))
            .expect("fit");
        let crash_col = vectorizer
            .feature_names()
            .iter()
            .position(|t| t == "crash")
            .expect("crash in vocab");
        assert_eq!(dtm.get(0, crash_col), 2.0);
        assert_eq!(dtm.get(1, crash_col), 0.0);
    }

    #[test]
    fn test_everything_filtered_yields_zero_columns() {
        let mut vectorizer = CountVectorizer::new().with_min_df(5);
        let dtm = vectorizer
            .fit_transform(&docs(&["one doc only"]))
            .expect("fit");
        assert_eq!(dtm.shape(), (1, 0));
        assert!(vectorizer.feature_names().is_empty());
    }

    #[test]
    fn test_empty_documents() {
        let mut vectorizer = CountVectorizer::new();
        let dtm = vectorizer.fit_transform(&[]).expect("fit");
        assert_eq!(dtm.shape(), (0, 0));
    }
}
