//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use resena::prelude::*;
//! ```

pub use crate::config::AnalysisConfig;
pub use crate::corpus::{Corpus, RawReview, Review};
pub use crate::error::{ResenaError, Result};
pub use crate::insight::{BankInsightSummary, ComparativeRanking, InsightAggregator};
pub use crate::pipeline::{AnalysisPipeline, AnalysisReport};
pub use crate::sentiment::{SentimentLabel, SentimentScorer};
pub use crate::text::keywords::KeywordExtractor;
pub use crate::text::normalize::normalize;
pub use crate::text::stopwords::StopWordsFilter;
pub use crate::topic::{Topic, TopicModel};
