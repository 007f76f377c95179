//! Per-bank insight aggregation.
//!
//! Combines scored reviews with extracted phrases into one
//! [`BankInsightSummary`] per bank: basic metrics, categorized drivers
//! (from high-rating reviews), categorized pain points (from low-rating
//! reviews), detected issues, and a rating breakdown. A comparative
//! ranking across banks orders them by average rating.
//!
//! Category classification walks the configured taxonomy in declared
//! order and the first rule whose keyword appears in the phrase wins;
//! that order is part of the contract, not an accident of iteration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::sentiment::{ScoredReview, SentimentLabel};
use crate::text::keywords::KeywordExtractor;
use crate::text::stopwords::StopWordsFilter;

/// Category assigned to phrases matching no configured rule.
pub const CATEGORY_OTHER: &str = "Other";

/// Category excluded from drivers alongside [`CATEGORY_OTHER`]: praise
/// words without an actionable subject.
pub const CATEGORY_GENERAL_SENTIMENT: &str = "General Sentiment";

/// A phrase with its mention count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMention {
    /// The extracted phrase
    pub phrase: String,
    /// Occurrences across the queried review slice
    pub count: usize,
}

/// A phrase with its mention count and assigned category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedPhrase {
    /// The extracted phrase
    pub phrase: String,
    /// Occurrences across the queried review slice
    pub count: usize,
    /// First matching category in taxonomy order
    pub category: String,
}

/// Total phrase mentions attributed to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMentions {
    /// Category name
    pub category: String,
    /// Summed mention counts of the category's phrases
    pub mentions: usize,
}

/// A detected issue with its review coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    /// Issue name from the configured rule
    pub issue: String,
    /// Reviews containing at least one of the rule's keywords
    pub review_count: usize,
    /// Share of the bank's reviews, in percent
    pub pct: f64,
}

/// Review count, share, and mean sentiment for one star value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSlice {
    /// Star value, 1-5
    pub rating: u8,
    /// Reviews with this rating
    pub count: usize,
    /// Share of the bank's reviews, in percent
    pub pct: f64,
    /// Mean sentiment score of these reviews, absent when none exist
    pub avg_sentiment: Option<f64>,
}

/// The per-bank summary artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankInsightSummary {
    /// Bank name
    pub bank: String,
    /// Total reviews for the bank
    pub total_reviews: usize,
    /// Reviews with rating >= the driver threshold
    pub positive_reviews: usize,
    /// Reviews with rating <= the pain-point threshold
    pub negative_reviews: usize,
    /// Mean star rating
    pub avg_rating: f64,
    /// Mean compound sentiment score
    pub avg_sentiment: f64,
    /// Share of positive sentiment labels, in percent
    pub positive_pct: f64,
    /// Share of negative sentiment labels, in percent
    pub negative_pct: f64,
    /// Share of neutral sentiment labels, in percent
    pub neutral_pct: f64,
    /// Categorized driver phrases from high-rating reviews
    pub drivers: Vec<CategorizedPhrase>,
    /// Raw top phrases, kept when no categorized driver was found
    pub fallback_drivers: Vec<PhraseMention>,
    /// Categorized pain-point phrases from low-rating reviews
    pub pain_points: Vec<CategorizedPhrase>,
    /// Pain-point mention totals per category, descending
    pub pain_by_category: Vec<CategoryMentions>,
    /// Issues mentioned by more reviews than the configured threshold
    pub issues: Vec<IssueReport>,
    /// Count, share, and mean sentiment per star value
    pub rating_breakdown: Vec<RatingSlice>,
}

/// A bank with its average rating, for comparative ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRating {
    /// Bank name
    pub bank: String,
    /// Mean star rating
    pub avg_rating: f64,
}

/// Cross-bank comparison by average rating. No significance testing:
/// raw ordering only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparativeRanking {
    /// Banks ordered by average rating descending, name ascending on ties
    pub by_avg_rating: Vec<EntityRating>,
    /// Every bank tied at the highest average rating, name ascending
    pub best: Vec<String>,
    /// Every bank tied at the lowest average rating, name ascending
    pub worst: Vec<String>,
}

/// Aggregator producing one [`BankInsightSummary`] per bank.
#[derive(Debug, Clone)]
pub struct InsightAggregator<'a> {
    config: &'a AnalysisConfig,
    extractor: KeywordExtractor,
}

impl<'a> InsightAggregator<'a> {
    /// Create an aggregator for the given configuration.
    #[must_use]
    pub fn new(config: &'a AnalysisConfig) -> Self {
        let stop_words =
            StopWordsFilter::review_domain().with_extra(&config.extra_stopwords);
        Self {
            config,
            extractor: KeywordExtractor::new(stop_words),
        }
    }

    /// Summarize one bank's scored reviews. Returns `None` for an empty
    /// slice: a bank with no reviews is skipped, not zero-filled.
    #[must_use]
    pub fn summarize(&self, bank: &str, reviews: &[&ScoredReview]) -> Option<BankInsightSummary> {
        if reviews.is_empty() {
            return None;
        }
        let total = reviews.len();
        let total_f = total as f64;

        let avg_rating =
            reviews.iter().map(|r| f64::from(r.review.rating)).sum::<f64>() / total_f;
        let avg_sentiment = reviews.iter().map(|r| r.score).sum::<f64>() / total_f;

        let label_count = |label: SentimentLabel| {
            reviews.iter().filter(|r| r.label == label).count() as f64
        };
        let positive_pct = label_count(SentimentLabel::Positive) / total_f * 100.0;
        let negative_pct = label_count(SentimentLabel::Negative) / total_f * 100.0;
        let neutral_pct = label_count(SentimentLabel::Neutral) / total_f * 100.0;

        let high: Vec<&str> = reviews
            .iter()
            .filter(|r| r.review.rating >= self.config.driver_min_rating)
            .map(|r| r.review.text.as_str())
            .collect();
        let low: Vec<&str> = reviews
            .iter()
            .filter(|r| r.review.rating <= self.config.pain_max_rating)
            .map(|r| r.review.text.as_str())
            .collect();

        let (drivers, fallback_drivers) = self.extract_drivers(&high);
        let (pain_points, pain_by_category) = self.extract_pain_points(&low);
        let issues = self.detect_issues(reviews);
        let rating_breakdown = rating_breakdown(reviews);

        Some(BankInsightSummary {
            bank: bank.to_string(),
            total_reviews: total,
            positive_reviews: high.len(),
            negative_reviews: low.len(),
            avg_rating,
            avg_sentiment,
            positive_pct,
            negative_pct,
            neutral_pct,
            drivers,
            fallback_drivers,
            pain_points,
            pain_by_category,
            issues,
            rating_breakdown,
        })
    }

    /// Drivers: categorized phrases from high-rating reviews, with
    /// general-sentiment and uncategorized phrases excluded. When
    /// nothing survives the exclusion, the raw top phrases are kept as
    /// a fallback instead.
    fn extract_drivers(
        &self,
        high_texts: &[&str],
    ) -> (Vec<CategorizedPhrase>, Vec<PhraseMention>) {
        let candidates = self
            .extractor
            .top_phrases(high_texts, self.config.phrase_candidates)
            .unwrap_or_default();

        let mut drivers = Vec::new();
        for (phrase, count) in candidates.iter().take(self.config.top_phrases) {
            let category = self.classify(phrase);
            if category != CATEGORY_GENERAL_SENTIMENT && category != CATEGORY_OTHER {
                drivers.push(CategorizedPhrase {
                    phrase: phrase.clone(),
                    count: *count,
                    category,
                });
            }
        }

        let fallback = if drivers.is_empty() {
            candidates
                .into_iter()
                .take(self.config.fallback_phrases)
                .map(|(phrase, count)| PhraseMention { phrase, count })
                .collect()
        } else {
            Vec::new()
        };

        (drivers, fallback)
    }

    /// Pain points: categorized phrases from low-rating reviews, all
    /// retained, with per-category mention totals for ranking.
    fn extract_pain_points(
        &self,
        low_texts: &[&str],
    ) -> (Vec<CategorizedPhrase>, Vec<CategoryMentions>) {
        let candidates = self
            .extractor
            .top_phrases(low_texts, self.config.phrase_candidates)
            .unwrap_or_default();

        let pain_points: Vec<CategorizedPhrase> = candidates
            .into_iter()
            .take(self.config.top_phrases)
            .map(|(phrase, count)| {
                let category = self.classify(&phrase);
                CategorizedPhrase {
                    phrase,
                    count,
                    category,
                }
            })
            .collect();

        let mut totals: HashMap<&str, usize> = HashMap::new();
        for phrase in &pain_points {
            *totals.entry(phrase.category.as_str()).or_insert(0) += phrase.count;
        }
        let mut by_category: Vec<CategoryMentions> = totals
            .into_iter()
            .map(|(category, mentions)| CategoryMentions {
                category: category.to_string(),
                mentions,
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.mentions
                .cmp(&a.mentions)
                .then_with(|| a.category.cmp(&b.category))
        });

        (pain_points, by_category)
    }

    /// First matching category in declared taxonomy order.
    fn classify(&self, phrase: &str) -> String {
        let lowered = phrase.to_lowercase();
        for rule in &self.config.categories {
            if rule.keywords.iter().any(|kw| lowered.contains(kw.as_str())) {
                return rule.name.clone();
            }
        }
        CATEGORY_OTHER.to_string()
    }

    /// Issues mentioned by strictly more reviews than the configured
    /// threshold. Counts reviews, not phrase occurrences.
    fn detect_issues(&self, reviews: &[&ScoredReview]) -> Vec<IssueReport> {
        let total_f = reviews.len() as f64;
        let mut reports = Vec::new();
        for rule in &self.config.issues {
            let count = reviews
                .iter()
                .filter(|r| {
                    rule.keywords
                        .iter()
                        .any(|kw| r.review.text.contains(kw.as_str()))
                })
                .count();
            if count > self.config.issue_min_mentions {
                reports.push(IssueReport {
                    issue: rule.name.clone(),
                    review_count: count,
                    pct: count as f64 / total_f * 100.0,
                });
            }
        }
        reports
    }
}

/// Count, share, and mean sentiment per star value 1-5.
fn rating_breakdown(reviews: &[&ScoredReview]) -> Vec<RatingSlice> {
    let total_f = reviews.len() as f64;
    (1..=5u8)
        .map(|rating| {
            let slice: Vec<&&ScoredReview> = reviews
                .iter()
                .filter(|r| r.review.rating == rating)
                .collect();
            let count = slice.len();
            let avg_sentiment = if count > 0 {
                Some(slice.iter().map(|r| r.score).sum::<f64>() / count as f64)
            } else {
                None
            };
            RatingSlice {
                rating,
                count,
                pct: count as f64 / total_f * 100.0,
                avg_sentiment,
            }
        })
        .collect()
}

/// Order banks by average rating and report the tied-best and tied-worst
/// sets. Ties break alphabetically and every tied bank is listed.
#[must_use]
pub fn comparative_ranking(summaries: &[BankInsightSummary]) -> ComparativeRanking {
    let mut by_avg_rating: Vec<EntityRating> = summaries
        .iter()
        .map(|s| EntityRating {
            bank: s.bank.clone(),
            avg_rating: s.avg_rating,
        })
        .collect();
    by_avg_rating.sort_by(|a, b| {
        b.avg_rating
            .partial_cmp(&a.avg_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.bank.cmp(&b.bank))
    });

    let best_rating = by_avg_rating.first().map(|e| e.avg_rating);
    let worst_rating = by_avg_rating.last().map(|e| e.avg_rating);

    let tied = |target: Option<f64>| -> Vec<String> {
        let Some(target) = target else {
            return Vec::new();
        };
        let mut banks: Vec<String> = by_avg_rating
            .iter()
            .filter(|e| e.avg_rating == target)
            .map(|e| e.bank.clone())
            .collect();
        banks.sort();
        banks
    };

    ComparativeRanking {
        best: tied(best_rating),
        worst: tied(worst_rating),
        by_avg_rating,
    }
}
