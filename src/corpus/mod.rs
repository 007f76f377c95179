//! Corpus ingestion and schema validation.
//!
//! Raw review records enter here once, are validated against the
//! required schema, deduplicated by review identifier (first occurrence
//! wins), and normalized. The resulting [`Review`] records are immutable
//! for the rest of the run.
//!
//! Schema problems are fatal: a corpus that fails validation produces a
//! [`crate::ResenaError::MalformedInput`] before any stage executes.
//!
//! # Quick Start
//!
//! ```
//! use resena::corpus::{Corpus, RawReview};
//!
//! let records = vec![RawReview {
//!     review_id: "r1".to_string(),
//!     bank: "CBE".to_string(),
//!     review: Some("Great app!".to_string()),
//!     rating: 5,
//!     date: "2024-05-01".to_string(),
//! }];
//!
//! let corpus = Corpus::from_records(records).unwrap();
//! assert_eq!(corpus.len(), 1);
//! assert_eq!(corpus.reviews()[0].text, "great app");
//! ```

use std::collections::HashSet;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{ResenaError, Result};
use crate::text::normalize::normalize;

/// The required input schema, quoted in malformed-input messages.
pub const EXPECTED_SCHEMA: &str = "review_id (string, unique), bank (string), \
review (string, nullable), rating (integer 1-5), date (ISO yyyy-mm-dd)";

/// A raw review record as produced by the acquisition collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReview {
    /// Unique, stable review identifier
    pub review_id: String,
    /// Owning entity name
    pub bank: String,
    /// Raw review text; `None` becomes the empty string
    #[serde(default)]
    pub review: Option<String>,
    /// Star rating, 1-5
    pub rating: i64,
    /// ISO date, yyyy-mm-dd
    pub date: String,
}

/// A validated, normalized review record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review identifier
    pub id: String,
    /// Owning entity name
    pub bank: String,
    /// Original text as received (empty string when absent)
    pub raw_text: String,
    /// Normalized text; may be empty, in which case the review only
    /// participates in rating aggregates
    pub text: String,
    /// Star rating, 1-5
    pub rating: u8,
    /// ISO date, yyyy-mm-dd
    pub date: String,
}

/// An in-memory snapshot of the review corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    reviews: Vec<Review>,
}

impl Corpus {
    /// Build a corpus from raw records.
    ///
    /// Duplicate review identifiers are dropped, keeping the first
    /// occurrence. Absent text becomes the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::MalformedInput`] when a record has an
    /// out-of-range rating, an empty identifier, an empty bank name, or
    /// a date that is not `yyyy-mm-dd`.
    pub fn from_records<I: IntoIterator<Item = RawReview>>(records: I) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut reviews = Vec::new();

        for record in records {
            if record.review_id.is_empty() {
                return Err(schema_error("empty review_id"));
            }
            if record.bank.is_empty() {
                return Err(schema_error(&format!(
                    "empty bank for review {}",
                    record.review_id
                )));
            }
            if !(1..=5).contains(&record.rating) {
                return Err(schema_error(&format!(
                    "rating {} out of range for review {}",
                    record.rating, record.review_id
                )));
            }
            if !is_iso_date(&record.date) {
                return Err(schema_error(&format!(
                    "date {:?} is not yyyy-mm-dd for review {}",
                    record.date, record.review_id
                )));
            }

            if !seen.insert(record.review_id.clone()) {
                continue;
            }

            let raw_text = record.review.unwrap_or_default();
            let text = normalize(&raw_text);
            reviews.push(Review {
                id: record.review_id,
                bank: record.bank,
                raw_text,
                text,
                rating: record.rating as u8,
                date: record.date,
            });
        }

        Ok(Self { reviews })
    }

    /// Build a corpus from JSON Lines input: one `RawReview` object per
    /// line, blank lines ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResenaError::MalformedInput`] on unreadable input or a
    /// line that does not match the expected schema; the message lists
    /// the schema.
    pub fn from_json_lines<R: BufRead>(reader: R) -> Result<Self> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ResenaError::malformed_input(format!("unreadable corpus at line {}: {e}", idx + 1))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: RawReview = serde_json::from_str(&line).map_err(|e| {
                schema_error(&format!("line {}: {e}", idx + 1))
            })?;
            records.push(record);
        }
        Self::from_records(records)
    }

    /// All reviews, in ingestion order.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Unique bank names, in first-seen order.
    #[must_use]
    pub fn banks(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut banks = Vec::new();
        for review in &self.reviews {
            if seen.insert(review.bank.as_str()) {
                banks.push(review.bank.clone());
            }
        }
        banks
    }

    /// Number of reviews.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// True when the corpus holds no reviews.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

fn schema_error(detail: &str) -> ResenaError {
    ResenaError::malformed_input(format!("{detail}; expected schema: {EXPECTED_SCHEMA}"))
}

/// Shape check for `yyyy-mm-dd` with plausible month and day ranges.
fn is_iso_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return false;
    }
    let month: u32 = date[5..7].parse().unwrap_or(0);
    let day: u32 = date[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, bank: &str, text: Option<&str>, rating: i64, date: &str) -> RawReview {
        RawReview {
            review_id: id.to_string(),
            bank: bank.to_string(),
            review: text.map(ToString::to_string),
            rating,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_dedup_first_wins() {
        let corpus = Corpus::from_records(vec![
            raw("r1", "CBE", Some("first text"), 5, "2024-01-01"),
            raw("r1", "CBE", Some("second text"), 1, "2024-01-02"),
            raw("r2", "CBE", Some("other"), 3, "2024-01-03"),
        ])
        .expect("corpus");

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.reviews()[0].raw_text, "first text");
        assert_eq!(corpus.reviews()[0].rating, 5);
    }

    #[test]
    fn test_absent_text_becomes_empty() {
        let corpus =
            Corpus::from_records(vec![raw("r1", "CBE", None, 4, "2024-01-01")]).expect("corpus");
        assert_eq!(corpus.reviews()[0].raw_text, "");
        assert_eq!(corpus.reviews()[0].text, "");
    }

    #[test]
    fn test_text_is_normalized() {
        let corpus = Corpus::from_records(vec![raw(
            "r1",
            "CBE",
            Some("  GREAT App!!  "),
            5,
            "2024-01-01",
        )])
        .expect("corpus");
        assert_eq!(corpus.reviews()[0].text, "great app");
    }

    #[test]
    fn test_rating_out_of_range_is_fatal() {
        let result = Corpus::from_records(vec![raw("r1", "CBE", Some("x"), 6, "2024-01-01")]);
        let err = result.unwrap_err();
        assert!(matches!(err, ResenaError::MalformedInput { .. }));
        assert!(err.to_string().contains("expected schema"));
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let result = Corpus::from_records(vec![raw("r1", "CBE", Some("x"), 3, "01/05/2024")]);
        assert!(result.is_err());
        let result = Corpus::from_records(vec![raw("r1", "CBE", Some("x"), 3, "2024-13-01")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_banks_first_seen_order() {
        let corpus = Corpus::from_records(vec![
            raw("r1", "Dashen", Some("a"), 3, "2024-01-01"),
            raw("r2", "CBE", Some("b"), 3, "2024-01-01"),
            raw("r3", "Dashen", Some("c"), 3, "2024-01-01"),
        ])
        .expect("corpus");
        assert_eq!(corpus.banks(), vec!["Dashen", "CBE"]);
    }

    #[test]
    fn test_from_json_lines() {
        let input = concat!(
            "{\"review_id\":\"r1\",\"bank\":\"CBE\",\"review\":\"Nice app\",",
            "\"rating\":4,\"date\":\"2024-02-01\"}\n",
            "\n",
            "{\"review_id\":\"r2\",\"bank\":\"CBE\",\"review\":null,",
            "\"rating\":2,\"date\":\"2024-02-02\"}\n",
        );
        let corpus = Corpus::from_json_lines(input.as_bytes()).expect("corpus");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.reviews()[1].text, "");
    }

    #[test]
    fn test_from_json_lines_missing_field_lists_schema() {
        let input = "{\"review_id\":\"r1\",\"bank\":\"CBE\",\"rating\":4}";
        let err = Corpus::from_json_lines(input.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("malformed input"));
        assert!(msg.contains("review_id (string, unique)"));
    }

    #[test]
    fn test_empty_corpus_is_allowed() {
        let corpus = Corpus::from_records(Vec::new()).expect("corpus");
        assert!(corpus.is_empty());
        assert!(corpus.banks().is_empty());
    }
}
