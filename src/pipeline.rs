//! Batch analysis pipeline.
//!
//! One full pass per stage over the in-memory corpus: sentiment scoring
//! first, then per-bank topic fitting and insight aggregation. Banks are
//! independent — each bank's computation is a pure function of the
//! shared read-only corpus, so they run in parallel and their results
//! are combined afterwards, with no shared mutable accumulator.
//!
//! Per-bank failures (typically too little data for a topic fit) are
//! caught at the bank boundary and reported as [`SkippedEntity`]
//! diagnostics; they never abort the other banks.
//!
//! # Quick Start
//!
//! ```
//! use resena::config::AnalysisConfig;
//! use resena::corpus::{Corpus, RawReview};
//! use resena::pipeline::AnalysisPipeline;
//!
//! let records = vec![
//!     RawReview {
//!         review_id: "r1".to_string(),
//!         bank: "CBE".to_string(),
//!         review: Some("Great app, fast transfer".to_string()),
//!         rating: 5,
//!         date: "2024-03-01".to_string(),
//!     },
//!     RawReview {
//!         review_id: "r2".to_string(),
//!         bank: "CBE".to_string(),
//!         review: Some("Crashes constantly".to_string()),
//!         rating: 1,
//!         date: "2024-03-02".to_string(),
//!     },
//! ];
//! let corpus = Corpus::from_records(records).unwrap();
//!
//! let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).unwrap();
//! let report = pipeline.run(&corpus).unwrap();
//!
//! assert_eq!(report.records.len(), 2);
//! assert_eq!(report.summaries.len(), 1);
//! // Two reviews cannot support a topic fit: skipped, not failed.
//! assert_eq!(report.skipped.len(), 1);
//! ```

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::corpus::{Corpus, Review};
use crate::error::{ResenaError, Result};
use crate::insight::{comparative_ranking, BankInsightSummary, ComparativeRanking, InsightAggregator};
use crate::sentiment::{ScoredReview, SentimentLabel, SentimentScorer};
use crate::topic::{Topic, TopicModel};

/// A fully analyzed review record: the input row extended with the
/// sentiment columns and, when the bank's topic fit succeeded, the
/// dominant topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedReview {
    /// The underlying review record
    #[serde(flatten)]
    pub review: Review,
    /// Sentiment label
    pub sentiment_label: SentimentLabel,
    /// Compound sentiment score in [-1, 1]
    pub sentiment_score: f64,
    /// Dominant topic for the review's bank, absent when the bank was
    /// skipped or the review has no usable text
    pub topic_id: Option<usize>,
}

/// Topic descriptions for one bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTopics {
    /// Bank name
    pub bank: String,
    /// Discovered topics in identifier order
    pub topics: Vec<Topic>,
}

/// Diagnostic for a bank whose topic fit was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntity {
    /// Bank name
    pub bank: String,
    /// Why the fit was skipped
    pub reason: String,
}

/// Everything a run produces, ready for the storage and rendering
/// collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// All reviews with sentiment and topic columns, in corpus order
    pub records: Vec<AnalyzedReview>,
    /// Per-bank topic descriptions, bank name ascending
    pub topics: Vec<EntityTopics>,
    /// Per-bank skip diagnostics, bank name ascending
    pub skipped: Vec<SkippedEntity>,
    /// Per-bank summaries, bank name ascending
    pub summaries: Vec<BankInsightSummary>,
    /// Cross-bank comparison by average rating
    pub ranking: ComparativeRanking,
}

impl AnalysisReport {
    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::Serialization`] on failure.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ResenaError::Serialization(e.to_string()))
    }
}

/// Outcome of one bank's independent computation.
struct EntityOutcome {
    bank: String,
    topics: Option<Vec<Topic>>,
    assignments: Vec<(usize, usize)>,
    skipped: Option<String>,
    summary: Option<BankInsightSummary>,
}

/// The batch pipeline: scoring, topic discovery, and aggregation over a
/// corpus snapshot.
#[allow(missing_debug_implementations)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    scorer: SentimentScorer,
}

impl AnalysisPipeline {
    /// Create a pipeline after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::InvalidHyperparameter`] when the
    /// configuration fails validation.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer: SentimentScorer::new(),
        })
    }

    /// Use a custom sentiment scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Run the full analysis over a corpus snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error only for corpus-level failures; per-bank topic
    /// problems surface as [`SkippedEntity`] diagnostics in the report.
    pub fn run(&self, corpus: &Corpus) -> Result<AnalysisReport> {
        let scored = self.score_all(corpus);

        // Group record indices per bank; BTreeMap keeps output order
        // deterministic regardless of ingestion order.
        let mut by_bank: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, record) in scored.iter().enumerate() {
            by_bank
                .entry(record.review.bank.clone())
                .or_default()
                .push(idx);
        }
        let entities: Vec<(String, Vec<usize>)> = by_bank.into_iter().collect();

        let topic_model = self.topic_model();
        let aggregator = InsightAggregator::new(&self.config);

        let outcomes: Vec<EntityOutcome> = entities
            .par_iter()
            .map(|(bank, indices)| analyze_entity(bank, indices, &scored, &topic_model, &aggregator))
            .collect();

        self.assemble(scored, outcomes)
    }

    /// Stage 1: sentiment over every record, in corpus order.
    fn score_all(&self, corpus: &Corpus) -> Vec<ScoredReview> {
        corpus
            .reviews()
            .iter()
            .map(|review| {
                let (label, score) = self.scorer.score(&review.text);
                ScoredReview {
                    review: review.clone(),
                    label,
                    score,
                }
            })
            .collect()
    }

    fn topic_model(&self) -> TopicModel {
        TopicModel::new(self.config.n_topics)
            .with_top_terms(self.config.topic_top_terms)
            .with_max_iter(self.config.lda_max_iter)
            .with_random_seed(self.config.random_seed)
            .with_min_df(self.config.min_document_frequency)
            .with_max_df(self.config.max_document_fraction)
            .with_max_features(self.config.max_vocabulary)
    }

    /// Combine per-bank outcomes into the final report.
    fn assemble(
        &self,
        scored: Vec<ScoredReview>,
        outcomes: Vec<EntityOutcome>,
    ) -> Result<AnalysisReport> {
        let mut topic_by_record: HashMap<usize, usize> = HashMap::new();
        let mut topics = Vec::new();
        let mut skipped = Vec::new();
        let mut summaries = Vec::new();

        for outcome in outcomes {
            if let Some(entity_topics) = outcome.topics {
                topics.push(EntityTopics {
                    bank: outcome.bank.clone(),
                    topics: entity_topics,
                });
            }
            for (record_idx, topic_id) in outcome.assignments {
                topic_by_record.insert(record_idx, topic_id);
            }
            if let Some(reason) = outcome.skipped {
                skipped.push(SkippedEntity {
                    bank: outcome.bank.clone(),
                    reason,
                });
            }
            if let Some(summary) = outcome.summary {
                summaries.push(summary);
            }
        }

        let records: Vec<AnalyzedReview> = scored
            .into_iter()
            .enumerate()
            .map(|(idx, s)| AnalyzedReview {
                review: s.review,
                sentiment_label: s.label,
                sentiment_score: s.score,
                topic_id: topic_by_record.get(&idx).copied(),
            })
            .collect();

        let ranking = comparative_ranking(&summaries);

        Ok(AnalysisReport {
            records,
            topics,
            skipped,
            summaries,
            ranking,
        })
    }
}

/// One bank's full computation: topic fit over its reviews with usable
/// text, plus the insight summary. Pure with respect to the shared
/// corpus; failures stay inside the returned outcome.
fn analyze_entity(
    bank: &str,
    indices: &[usize],
    scored: &[ScoredReview],
    topic_model: &TopicModel,
    aggregator: &InsightAggregator<'_>,
) -> EntityOutcome {
    let text_indices: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&idx| !scored[idx].review.text.is_empty())
        .collect();
    let documents: Vec<&str> = text_indices
        .iter()
        .map(|&idx| scored[idx].review.text.as_str())
        .collect();

    let (topics, assignments, skipped) = match topic_model.fit(&documents) {
        Ok(fit) => {
            let assignments = text_indices.iter().copied().zip(fit.assignments).collect();
            (Some(fit.topics), assignments, None)
        }
        Err(err) => (None, Vec::new(), Some(err.to_string())),
    };

    let subset: Vec<&ScoredReview> = indices.iter().map(|&idx| &scored[idx]).collect();
    let summary = aggregator.summarize(bank, &subset);

    EntityOutcome {
        bank: bank.to_string(),
        topics,
        assignments,
        skipped,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawReview;

    fn raw(id: &str, bank: &str, text: &str, rating: i64) -> RawReview {
        RawReview {
            review_id: id.to_string(),
            bank: bank.to_string(),
            review: Some(text.to_string()),
            rating,
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_records_preserve_corpus_order() {
        let corpus = Corpus::from_records(vec![
            raw("r1", "B", "good", 4),
            raw("r2", "A", "bad", 2),
            raw("r3", "B", "fine", 3),
        ])
        .expect("corpus");
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).expect("pipeline");
        let report = pipeline.run(&corpus).expect("run");

        let ids: Vec<&str> = report.records.iter().map(|r| r.review.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_summaries_sorted_by_bank() {
        let corpus = Corpus::from_records(vec![
            raw("r1", "Zeta", "good", 4),
            raw("r2", "Alpha", "bad", 2),
        ])
        .expect("corpus");
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).expect("pipeline");
        let report = pipeline.run(&corpus).expect("run");

        let banks: Vec<&str> = report.summaries.iter().map(|s| s.bank.as_str()).collect();
        assert_eq!(banks, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_empty_text_neutral_and_unassigned() {
        let mut record = raw("r1", "A", "", 3);
        record.review = None;
        let corpus = Corpus::from_records(vec![record]).expect("corpus");
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).expect("pipeline");
        let report = pipeline.run(&corpus).expect("run");

        let analyzed = &report.records[0];
        assert_eq!(analyzed.sentiment_label, SentimentLabel::Neutral);
        assert_eq!(analyzed.sentiment_score, 0.0);
        assert!(analyzed.topic_id.is_none());

        // Rating-only aggregates still include the review.
        assert_eq!(report.summaries[0].total_reviews, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalysisConfig::default();
        config.n_topics = 0;
        assert!(AnalysisPipeline::new(config).is_err());
    }

    #[test]
    fn test_empty_corpus_yields_empty_report() {
        let corpus = Corpus::from_records(Vec::new()).expect("corpus");
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).expect("pipeline");
        let report = pipeline.run(&corpus).expect("run");

        assert!(report.records.is_empty());
        assert!(report.summaries.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.ranking.best.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let corpus = Corpus::from_records(vec![raw("r1", "A", "good", 4)]).expect("corpus");
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).expect("pipeline");
        let report = pipeline.run(&corpus).expect("run");

        let json = report.to_json_pretty().expect("json");
        assert!(json.contains("\"records\""));
        assert!(json.contains("\"sentiment_label\""));
    }
}
