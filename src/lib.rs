//! Resena: app-store review analytics in pure Rust.
//!
//! Resena turns raw app-store review text into structured analytic
//! artifacts: per-review sentiment polarity, per-bank dominant topics,
//! and aggregated driver/pain-point summaries. The pipeline is a batch
//! job over an in-memory corpus snapshot; review acquisition, durable
//! storage, and chart rendering are external collaborators.
//!
//! # Quick Start
//!
//! ```
//! use resena::prelude::*;
//!
//! let records = vec![
//!     RawReview {
//!         review_id: "r1".to_string(),
//!         bank: "CBE".to_string(),
//!         review: Some("Great app, fast transfer!".to_string()),
//!         rating: 5,
//!         date: "2024-06-01".to_string(),
//!     },
//!     RawReview {
//!         review_id: "r2".to_string(),
//!         bank: "CBE".to_string(),
//!         review: Some("Crashes constantly, freezes".to_string()),
//!         rating: 1,
//!         date: "2024-06-02".to_string(),
//!     },
//! ];
//!
//! let corpus = Corpus::from_records(records).unwrap();
//! let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).unwrap();
//! let report = pipeline.run(&corpus).unwrap();
//!
//! assert_eq!(report.records.len(), 2);
//! assert_eq!(report.records[0].sentiment_label, SentimentLabel::Positive);
//! assert_eq!(report.records[1].sentiment_label, SentimentLabel::Negative);
//! assert_eq!(report.summaries.len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`corpus`]: ingestion, schema validation, deduplication
//! - [`text`]: normalization, tokenization, stop words, stemming, keywords
//! - [`sentiment`]: lexicon-based polarity scoring and labeling
//! - [`topic`]: per-bank topic discovery (vectorization + LDA)
//! - [`insight`]: per-bank summaries, drivers, pain points, ranking
//! - [`pipeline`]: batch orchestration over the corpus
//! - [`config`]: every tunable as overridable data
//! - [`primitives`]: the dense matrix backing the topic model

pub mod config;
pub mod corpus;
pub mod error;
pub mod insight;
pub mod pipeline;
pub mod prelude;
pub mod primitives;
pub mod sentiment;
pub mod text;
pub mod topic;

pub use error::{ResenaError, Result};
pub use primitives::Matrix;
