//! Analysis configuration.
//!
//! Every tunable of the pipeline lives here as plain data: stop word
//! extras, the category taxonomy, issue rules, topic-model knobs, and
//! extraction thresholds. Defaults reproduce the standard analysis;
//! everything is overridable from JSON without touching pipeline code.
//!
//! # Examples
//!
//! ```
//! use resena::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.n_topics, 5);
//!
//! // Partial overrides from JSON keep the remaining defaults
//! let config = AnalysisConfig::from_json(r#"{"n_topics": 3}"#).unwrap();
//! assert_eq!(config.n_topics, 3);
//! assert_eq!(config.topic_top_terms, 12);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ResenaError, Result};

/// An ordered category rule: the first rule whose keyword matches a
/// phrase (case-insensitive substring) claims it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name
    pub name: String,
    /// Keywords matched as substrings against the phrase
    pub keywords: Vec<String>,
}

/// A named issue detector: a review counts toward the issue when its
/// text contains any of the keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRule {
    /// Issue name
    pub name: String,
    /// Keywords matched as substrings against review text
    pub keywords: Vec<String>,
}

/// Configuration for a full analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of topics fit per bank
    pub n_topics: usize,
    /// Terms kept as each topic's descriptive label
    pub topic_top_terms: usize,
    /// Iteration budget for topic inference
    pub lda_max_iter: usize,
    /// Seed for reproducible topic fits
    pub random_seed: u64,
    /// Minimum number of documents a term must appear in
    pub min_document_frequency: usize,
    /// Maximum fraction of documents a term may appear in
    pub max_document_fraction: f64,
    /// Vocabulary size cap for the document-term matrix
    pub max_vocabulary: usize,
    /// Words returned by top-word queries
    pub top_words: usize,
    /// Phrase candidates pulled before category classification
    pub phrase_candidates: usize,
    /// Phrases classified for drivers and pain points
    pub top_phrases: usize,
    /// Raw phrases kept as fallback when no categorized driver exists
    pub fallback_phrases: usize,
    /// Minimum rating for the driver subset
    pub driver_min_rating: u8,
    /// Maximum rating for the pain-point subset
    pub pain_max_rating: u8,
    /// An issue is reported only when strictly more than this many
    /// reviews mention it
    pub issue_min_mentions: usize,
    /// Corpus-specific stop words (e.g. the bank names)
    pub extra_stopwords: Vec<String>,
    /// Ordered category taxonomy for phrase classification
    pub categories: Vec<CategoryRule>,
    /// Issue detectors
    pub issues: Vec<IssueRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            n_topics: 5,
            topic_top_terms: 12,
            lda_max_iter: 15,
            random_seed: 42,
            min_document_frequency: 5,
            max_document_fraction: 0.95,
            max_vocabulary: 5000,
            top_words: 10,
            phrase_candidates: 15,
            top_phrases: 8,
            fallback_phrases: 5,
            driver_min_rating: 4,
            pain_max_rating: 2,
            issue_min_mentions: 5,
            extra_stopwords: Vec::new(),
            categories: default_categories(),
            issues: default_issues(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON. Missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::Serialization`] on invalid JSON and
    /// [`ResenaError::InvalidHyperparameter`] when a value fails
    /// validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ResenaError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::InvalidHyperparameter`] on the first
    /// violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.n_topics == 0 {
            return Err(invalid("n_topics", &self.n_topics.to_string(), "> 0"));
        }
        if self.lda_max_iter == 0 {
            return Err(invalid("lda_max_iter", &self.lda_max_iter.to_string(), "> 0"));
        }
        if self.min_document_frequency == 0 {
            return Err(invalid(
                "min_document_frequency",
                &self.min_document_frequency.to_string(),
                ">= 1",
            ));
        }
        if !(self.max_document_fraction > 0.0 && self.max_document_fraction <= 1.0) {
            return Err(invalid(
                "max_document_fraction",
                &self.max_document_fraction.to_string(),
                "in (0, 1]",
            ));
        }
        if self.max_vocabulary == 0 {
            return Err(invalid("max_vocabulary", &self.max_vocabulary.to_string(), "> 0"));
        }
        if self.driver_min_rating > 5 || self.driver_min_rating < 1 {
            return Err(invalid(
                "driver_min_rating",
                &self.driver_min_rating.to_string(),
                "in 1..=5",
            ));
        }
        if self.pain_max_rating > 5 || self.pain_max_rating < 1 {
            return Err(invalid(
                "pain_max_rating",
                &self.pain_max_rating.to_string(),
                "in 1..=5",
            ));
        }
        Ok(())
    }
}

fn invalid(param: &str, value: &str, constraint: &str) -> ResenaError {
    ResenaError::InvalidHyperparameter {
        param: param.to_string(),
        value: value.to_string(),
        constraint: constraint.to_string(),
    }
}

fn rule(name: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

/// The standard category taxonomy, in classification order.
///
/// Order is part of the contract: a phrase is claimed by the first rule
/// whose keyword it contains.
#[must_use]
pub fn default_categories() -> Vec<CategoryRule> {
    vec![
        rule(
            "Technical Issues",
            &["crash", "bug", "error", "issue", "problem", "working", "work", "fix", "update"],
        ),
        rule(
            "Performance",
            &["slow", "lag", "loading", "speed", "time", "wait", "fast", "quick"],
        ),
        rule(
            "Usability",
            &["easy", "hard", "difficult", "simple", "complex", "interface", "design", "user"],
        ),
        rule(
            "Features",
            &["feature", "transfer", "payment", "login", "password", "account", "balance"],
        ),
        rule(
            "Customer Service",
            &["support", "service", "help", "response", "contact"],
        ),
        rule(
            "Security",
            &["secure", "safe", "trust", "password", "login", "verification"],
        ),
        rule(
            "General Sentiment",
            &["best", "worst", "nice", "great", "good", "bad", "super", "excellent", "terrible"],
        ),
    ]
}

/// The standard issue detectors.
#[must_use]
pub fn default_issues() -> Vec<IssueRule> {
    let issue = |name: &str, keywords: &[&str]| IssueRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    };
    vec![
        issue(
            "Login/Account Issues",
            &["login", "password", "account", "access", "verification"],
        ),
        issue(
            "Transaction Problems",
            &["transfer", "payment", "transaction", "money", "send"],
        ),
        issue(
            "App Performance",
            &["crash", "freeze", "hang", "not working", "stop"],
        ),
        issue("Speed Issues", &["slow", "loading", "wait", "time", "delay"]),
        issue(
            "Update Problems",
            &["update", "version", "new version", "upgrade"],
        ),
        issue("Customer Support", &["support", "help", "service", "response"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.n_topics, 5);
        assert_eq!(config.min_document_frequency, 5);
        assert_eq!(config.categories.len(), 7);
        assert_eq!(config.categories[0].name, "Technical Issues");
        assert_eq!(config.issues.len(), 6);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_category_order_is_stable() {
        let names: Vec<String> = default_categories().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Technical Issues",
                "Performance",
                "Usability",
                "Features",
                "Customer Service",
                "Security",
                "General Sentiment",
            ]
        );
    }

    #[test]
    fn test_from_json_partial_override() {
        let config =
            AnalysisConfig::from_json(r#"{"n_topics": 2, "issue_min_mentions": 0}"#).expect("json");
        assert_eq!(config.n_topics, 2);
        assert_eq!(config.issue_min_mentions, 0);
        assert_eq!(config.lda_max_iter, 15);
    }

    #[test]
    fn test_from_json_invalid_json() {
        let err = AnalysisConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ResenaError::Serialization(_)));
    }

    #[test]
    fn test_validate_rejects_zero_topics() {
        let mut config = AnalysisConfig::default();
        config.n_topics = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("n_topics"));
    }

    #[test]
    fn test_validate_rejects_bad_fraction() {
        let mut config = AnalysisConfig::default();
        config.max_document_fraction = 1.5;
        assert!(config.validate().is_err());
        config.max_document_fraction = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_taxonomy_is_overridable_data() {
        let json = r#"{"categories": [{"name": "Crashes", "keywords": ["crash"]}]}"#;
        let config = AnalysisConfig::from_json(json).expect("json");
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].name, "Crashes");
    }
}
