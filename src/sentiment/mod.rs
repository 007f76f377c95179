//! Lexicon-based sentiment scoring for review text.
//!
//! Scoring combines the VADER compound polarity with a review-domain
//! keyword boost, producing a score in [-1, 1] and a discrete label:
//!
//! - score >= +0.05 -> positive
//! - score <= -0.05 -> negative
//! - otherwise     -> neutral
//!
//! Empty or whitespace-only text short-circuits to (neutral, 0.0)
//! without invoking the model. Scoring is deterministic: the same text
//! always yields the same score.
//!
//! # Quick Start
//!
//! ```
//! use resena::sentiment::{SentimentLabel, SentimentScorer};
//!
//! let scorer = SentimentScorer::new();
//! let (label, score) = scorer.score("great app fast transfer");
//! assert_eq!(label, SentimentLabel::Positive);
//! assert!(score > 0.05 && score <= 1.0);
//!
//! assert_eq!(scorer.score("   "), (SentimentLabel::Neutral, 0.0));
//! ```

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::corpus::Review;

/// Score at or above which a review is labeled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Score at or below which a review is labeled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Review-domain terms that push polarity upward, with their weights.
/// General-purpose lexicons underrate app-review vocabulary; weighted
/// substring hits close the gap.
const POSITIVE_BOOST_TERMS: &[(&str, f64)] = &[
    ("fast", 0.3),
    ("easy", 0.3),
    ("smooth", 0.3),
    ("convenient", 0.3),
    ("reliable", 0.3),
    ("helpful", 0.2),
    ("secure", 0.2),
    ("simple", 0.2),
];

const NEGATIVE_BOOST_TERMS: &[(&str, f64)] = &[
    ("crash", -0.5),
    ("freeze", -0.4),
    ("froze", -0.4),
    ("hang", -0.3),
    ("slow", -0.4),
    ("stuck", -0.3),
    ("error", -0.3),
    ("fail", -0.4),
    ("scam", -0.6),
    ("fraud", -0.5),
    ("useless", -0.4),
    ("waste", -0.4),
];

/// Discrete sentiment label derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Score at or above [`POSITIVE_THRESHOLD`]
    Positive,
    /// Score strictly between the thresholds
    Neutral,
    /// Score at or below [`NEGATIVE_THRESHOLD`]
    Negative,
}

impl SentimentLabel {
    /// String form used in serialized artifacts.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a compound score onto its label.
///
/// # Examples
///
/// ```
/// use resena::sentiment::{label_for_score, SentimentLabel};
///
/// assert_eq!(label_for_score(0.06), SentimentLabel::Positive);
/// assert_eq!(label_for_score(-0.5), SentimentLabel::Negative);
/// assert_eq!(label_for_score(0.0), SentimentLabel::Neutral);
/// ```
#[must_use]
pub fn label_for_score(score: f64) -> SentimentLabel {
    if score >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Pluggable polarity model: any conforming scorer returns a compound
/// value in [-1, 1] for non-empty text.
pub trait PolarityScorer {
    /// Compound polarity of the text, in [-1, 1].
    fn polarity(&self, text: &str) -> f64;
}

/// Default polarity model: VADER compound score plus a review-domain
/// keyword boost, clamped to [-1, 1].
#[allow(missing_debug_implementations)]
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    /// Create a new scorer with the built-in lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn domain_boost(text: &str) -> f64 {
        let mut boost = 0.0;
        for (term, weight) in POSITIVE_BOOST_TERMS {
            if text.contains(term) {
                boost += weight;
            }
        }
        for (term, weight) in NEGATIVE_BOOST_TERMS {
            if text.contains(term) {
                boost += weight;
            }
        }
        boost
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        let boosted = compound + Self::domain_boost(text) * 0.5;
        boosted.clamp(-1.0, 1.0)
    }
}

/// Sentiment scorer: threshold labeling over a pluggable polarity model.
#[allow(missing_debug_implementations)]
pub struct SentimentScorer {
    scorer: Box<dyn PolarityScorer>,
}

impl SentimentScorer {
    /// Create a scorer backed by the default [`VaderScorer`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            scorer: Box::new(VaderScorer::new()),
        }
    }

    /// Use a custom polarity model.
    #[must_use]
    pub fn with_scorer(scorer: Box<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Score normalized review text.
    ///
    /// Empty or whitespace-only input returns (neutral, 0.0) without
    /// invoking the model.
    #[must_use]
    pub fn score(&self, text: &str) -> (SentimentLabel, f64) {
        if text.trim().is_empty() {
            return (SentimentLabel::Neutral, 0.0);
        }
        let value = self.scorer.polarity(text);
        (label_for_score(value), value)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// A review paired with its sentiment result: the scoring stage's output
/// and the aggregation stage's input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredReview {
    /// The underlying review record
    pub review: Review,
    /// Discrete sentiment label
    pub label: SentimentLabel,
    /// Compound score in [-1, 1]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_short_circuits() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), (SentimentLabel::Neutral, 0.0));
        assert_eq!(scorer.score("   \t"), (SentimentLabel::Neutral, 0.0));
    }

    #[test]
    fn test_positive_review() {
        let scorer = SentimentScorer::new();
        let (label, score) = scorer.score("great app fast transfer");
        assert_eq!(label, SentimentLabel::Positive);
        assert!(score >= POSITIVE_THRESHOLD);
    }

    #[test]
    fn test_negative_review() {
        let scorer = SentimentScorer::new();
        let (label, score) = scorer.score("crashes constantly freeze");
        assert_eq!(label, SentimentLabel::Negative);
        assert!(score <= NEGATIVE_THRESHOLD);
    }

    #[test]
    fn test_mixed_review_not_positive() {
        let scorer = SentimentScorer::new();
        let (label, _) = scorer.score("ok but slow loading");
        assert_ne!(label, SentimentLabel::Positive);
    }

    #[test]
    fn test_score_bounds() {
        let scorer = SentimentScorer::new();
        let texts = [
            "worst scam fraud crash useless waste terrible horrible",
            "great excellent fast easy smooth reliable amazing wonderful",
            "the balance screen shows numbers",
        ];
        for text in texts {
            let (_, score) = scorer.score(text);
            assert!((-1.0..=1.0).contains(&score), "out of range for {text:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let scorer = SentimentScorer::new();
        let a = scorer.score("transfer failed with error");
        let b = scorer.score("transfer failed with error");
        assert_eq!(a, b);
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(label_for_score(0.05), SentimentLabel::Positive);
        assert_eq!(label_for_score(0.049), SentimentLabel::Neutral);
        assert_eq!(label_for_score(-0.05), SentimentLabel::Negative);
        assert_eq!(label_for_score(-0.049), SentimentLabel::Neutral);
        assert_eq!(label_for_score(1.0), SentimentLabel::Positive);
        assert_eq!(label_for_score(-1.0), SentimentLabel::Negative);
    }

    #[test]
    fn test_custom_scorer_seam() {
        struct Fixed(f64);
        impl PolarityScorer for Fixed {
            fn polarity(&self, _text: &str) -> f64 {
                self.0
            }
        }
        let scorer = SentimentScorer::with_scorer(Box::new(Fixed(0.5)));
        assert_eq!(scorer.score("anything"), (SentimentLabel::Positive, 0.5));
    }

    #[test]
    fn test_label_serde_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).expect("serialize");
        assert_eq!(json, "\"positive\"");
        let label: SentimentLabel = serde_json::from_str("\"negative\"").expect("deserialize");
        assert_eq!(label, SentimentLabel::Negative);
    }
}
