//! Unsupervised topic discovery per bank.
//!
//! The [`TopicModel`] runs the full chain for one entity's documents:
//! tokenize, stop-filter, stem, vectorize into a document-term count
//! matrix, decompose with LDA, and read off topic labels plus a dominant
//! topic per document. Entities whose corpus cannot support the fit
//! produce [`crate::ResenaError::DataInsufficient`], never a crash.
//!
//! Topic identifiers are scoped per entity: topic 0 of one bank has no
//! relation to topic 0 of another.
//!
//! # Quick Start
//!
//! ```
//! use resena::topic::TopicModel;
//!
//! let docs = vec![
//!     "transfer money fast", "transfer money simple", "transfer money works",
//!     "transfer money quick", "transfer money daily", "nice design colors",
//! ];
//!
//! let model = TopicModel::new(2).with_min_df(5);
//! let fit = model.fit(&docs).unwrap();
//! assert_eq!(fit.assignments.len(), 6);
//! assert_eq!(fit.topics.len(), 2);
//! ```

pub mod lda;
pub mod vectorize;

use serde::{Deserialize, Serialize};

use crate::error::{ResenaError, Result};
use crate::text::stem::{LightStemmer, Stemmer};
use crate::text::stopwords::StopWordsFilter;
use crate::text::tokenize::AlphaTokenizer;
use crate::text::Tokenizer;
use lda::LatentDirichletAllocation;
use vectorize::CountVectorizer;

/// A discovered topic: its per-entity identifier and descriptive terms,
/// highest weight first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Topic identifier, `0..n_topics`, scoped to the fitted entity
    pub topic_id: usize,
    /// Top-weighted terms, descending
    pub terms: Vec<String>,
}

/// Result of fitting one entity's documents.
#[derive(Debug, Clone)]
pub struct TopicFit {
    /// Discovered topics with their descriptive terms
    pub topics: Vec<Topic>,
    /// Dominant topic per input document, parallel to the input order
    pub assignments: Vec<usize>,
}

/// Topic discovery pipeline for a single entity's documents.
#[derive(Debug, Clone)]
pub struct TopicModel {
    n_topics: usize,
    top_terms: usize,
    max_iter: usize,
    random_seed: u64,
    min_df: usize,
    max_df: f64,
    max_features: usize,
    tokenizer: AlphaTokenizer,
    stop_words: StopWordsFilter,
    stemmer: LightStemmer,
}

impl TopicModel {
    /// Create a model with the given number of topics and the standard
    /// preprocessing defaults.
    #[must_use]
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            top_terms: 12,
            max_iter: 15,
            random_seed: 42,
            min_df: 5,
            max_df: 0.95,
            max_features: 5000,
            tokenizer: AlphaTokenizer::new(),
            stop_words: StopWordsFilter::english(),
            stemmer: LightStemmer::new(),
        }
    }

    /// Number of descriptive terms kept per topic.
    #[must_use]
    pub fn with_top_terms(mut self, top_terms: usize) -> Self {
        self.top_terms = top_terms;
        self
    }

    /// Iteration budget for the decomposition.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Random seed for reproducible fits.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Minimum document frequency for vocabulary terms.
    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Maximum document-frequency fraction for vocabulary terms.
    #[must_use]
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    /// Vocabulary size cap.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Replace the language-level stop word filter.
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWordsFilter) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Fit topics over one entity's documents.
    ///
    /// Documents should already be normalized; each is reduced to
    /// alphabetic tokens longer than two characters, stop-filtered, and
    /// stemmed before vectorization.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::DataInsufficient`] when the entity has
    /// fewer documents than the minimum document frequency requires, or
    /// when every candidate term is filtered out of the vocabulary.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<TopicFit> {
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(ResenaError::data_insufficient(
                "no documents with usable text",
            ));
        }
        if n_docs < self.min_df {
            return Err(ResenaError::data_insufficient(format!(
                "{n_docs} documents, need at least {}",
                self.min_df
            )));
        }

        let mut token_docs = Vec::with_capacity(n_docs);
        for doc in documents {
            let tokens = self.tokenizer.tokenize(doc.as_ref())?;
            let kept = self.stop_words.filter_owned(tokens);
            token_docs.push(self.stemmer.stem_tokens(&kept)?);
        }

        let mut vectorizer = CountVectorizer::new()
            .with_min_df(self.min_df)
            .with_max_df(self.max_df)
            .with_max_features(self.max_features)
            .with_ngram_range(1, 2);
        let dtm = vectorizer.fit_transform(&token_docs)?;

        if dtm.n_cols() == 0 {
            return Err(ResenaError::data_insufficient(
                "vocabulary empty after document-frequency filtering",
            ));
        }

        let mut lda = LatentDirichletAllocation::new(self.n_topics)
            .with_max_iter(self.max_iter)
            .with_random_seed(self.random_seed);
        lda.fit(&dtm)?;

        let vocabulary = vectorizer.feature_names().to_vec();
        let topics = lda
            .top_terms(&vocabulary, self.top_terms)?
            .into_iter()
            .enumerate()
            .map(|(topic_id, terms)| Topic {
                topic_id,
                terms: terms.into_iter().map(|(term, _)| term).collect(),
            })
            .collect();
        let assignments = lda.dominant_topics()?;

        Ok(TopicFit { topics, assignments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported_docs() -> Vec<&'static str> {
        vec![
            "transfer money fast service",
            "transfer money simple service",
            "transfer money works service",
            "transfer money quick service",
            "transfer money daily service",
            "nice design colors",
        ]
    }

    #[test]
    fn test_fit_assigns_every_document() {
        let model = TopicModel::new(2).with_min_df(5);
        let fit = model.fit(&supported_docs()).expect("fit");

        assert_eq!(fit.assignments.len(), 6);
        assert!(fit.assignments.iter().all(|&t| t < 2));

        // Assigned counts across topics total the corpus size.
        let mut counts = vec![0usize; 2];
        for &t in &fit.assignments {
            counts[t] += 1;
        }
        assert_eq!(counts.iter().sum::<usize>(), 6);
    }

    #[test]
    fn test_topics_have_ids_and_terms() {
        let model = TopicModel::new(2).with_min_df(5).with_top_terms(3);
        let fit = model.fit(&supported_docs()).expect("fit");

        assert_eq!(fit.topics.len(), 2);
        for (idx, topic) in fit.topics.iter().enumerate() {
            assert_eq!(topic.topic_id, idx);
            assert!(!topic.terms.is_empty());
            assert!(topic.terms.len() <= 3);
        }
    }

    #[test]
    fn test_vocabulary_is_stemmed_and_stopfiltered() {
        let model = TopicModel::new(2).with_min_df(5);
        let fit = model.fit(&supported_docs()).expect("fit");

        for topic in &fit.topics {
            for term in &topic.terms {
                for word in term.split(' ') {
                    assert!(!StopWordsFilter::english().is_stop_word(word));
                }
            }
        }
    }

    #[test]
    fn test_too_few_documents() {
        let model = TopicModel::new(2).with_min_df(5);
        let err = model.fit(&["only", "two docs"]).unwrap_err();
        assert!(err.is_data_insufficient());
        assert!(err.to_string().contains("need at least 5"));
    }

    #[test]
    fn test_no_surviving_vocabulary() {
        // Six documents but no term reaches the document-frequency floor.
        let docs = vec!["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
        let model = TopicModel::new(2).with_min_df(5);
        let err = model.fit(&docs).unwrap_err();
        assert!(err.is_data_insufficient());
        assert!(err.to_string().contains("vocabulary"));
    }

    #[test]
    fn test_empty_document_list() {
        let model = TopicModel::new(2);
        let err = model.fit(&Vec::<&str>::new()).unwrap_err();
        assert!(err.is_data_insufficient());
    }

    #[test]
    fn test_reproducible() {
        let model = TopicModel::new(2).with_min_df(5).with_random_seed(7);
        let a = model.fit(&supported_docs()).expect("fit");
        let b = model.fit(&supported_docs()).expect("fit");
        assert_eq!(a.assignments, b.assignments);
        let terms_a: Vec<_> = a.topics.iter().map(|t| t.terms.clone()).collect();
        let terms_b: Vec<_> = b.topics.iter().map(|t| t.terms.clone()).collect();
        assert_eq!(terms_a, terms_b);
    }

    #[test]
    fn test_topic_serialization() {
        let topic = Topic {
            topic_id: 1,
            terms: vec!["transfer".to_string(), "money".to_string()],
        };
        let json = serde_json::to_string(&topic).expect("serialize");
        assert!(json.contains("\"topic_id\":1"));
        assert!(json.contains("transfer"));
    }
}
