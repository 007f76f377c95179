//! Latent Dirichlet Allocation over document-term counts.
//!
//! Batch EM-style inference with seeded initialization: the same matrix,
//! seed, and iteration budget always reproduce the same distributions.

use crate::error::{ResenaError, Result};
use crate::primitives::Matrix;

/// Latent Dirichlet Allocation topic model.
///
/// Models each document as a mixture of topics and each topic as a
/// distribution over terms. Initialization noise comes from a seeded
/// linear congruential generator, so fits are reproducible.
///
/// # Examples
///
/// ```
/// use resena::primitives::Matrix;
/// use resena::topic::lda::LatentDirichletAllocation;
///
/// let dtm = Matrix::from_vec(3, 4, vec![
///     2.0, 1.0, 0.0, 0.0,
///     0.0, 0.0, 2.0, 1.0,
///     1.0, 0.0, 0.0, 2.0,
/// ]).unwrap();
///
/// let mut lda = LatentDirichletAllocation::new(2).with_max_iter(10);
/// lda.fit(&dtm).unwrap();
/// assert_eq!(lda.dominant_topics().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LatentDirichletAllocation {
    n_topics: usize,
    max_iter: usize,
    random_seed: u64,
    doc_topic: Option<Matrix>,
    topic_term: Option<Matrix>,
}

impl LatentDirichletAllocation {
    /// Create a model with the given number of topics.
    #[must_use]
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            max_iter: 15,
            random_seed: 42,
            doc_topic: None,
            topic_term: None,
        }
    }

    /// Set the iteration budget.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Fit the model to a document-term count matrix.
    ///
    /// # Errors
    ///
    /// Returns an error when `n_topics` is zero or the matrix has no
    /// rows or columns.
    pub fn fit(&mut self, dtm: &Matrix) -> Result<()> {
        if self.n_topics == 0 {
            return Err(ResenaError::InvalidHyperparameter {
                param: "n_topics".to_string(),
                value: "0".to_string(),
                constraint: "> 0".to_string(),
            });
        }

        let n_docs = dtm.n_rows();
        let n_terms = dtm.n_cols();
        if n_docs == 0 || n_terms == 0 {
            return Err(ResenaError::Other(
                "document-term matrix cannot be empty".to_string(),
            ));
        }

        // Uniform initialization plus seeded noise, normalized per row.
        let mut doc_topic = vec![0.0; n_docs * self.n_topics];
        let mut topic_term = vec![0.0; self.n_topics * n_terms];

        let doc_topic_init = 1.0 / self.n_topics as f64;
        for (idx, value) in doc_topic.iter_mut().enumerate() {
            *value = doc_topic_init + self.seeded_noise(idx) * 0.01;
        }
        let topic_term_init = 1.0 / n_terms as f64;
        for (idx, value) in topic_term.iter_mut().enumerate() {
            *value = topic_term_init + self.seeded_noise(idx + 1000) * 0.01;
        }

        normalize_rows(&mut doc_topic, n_docs, self.n_topics);
        normalize_rows(&mut topic_term, self.n_topics, n_terms);

        for _ in 0..self.max_iter {
            let mut next_doc_topic = vec![0.0; n_docs * self.n_topics];
            let mut next_topic_term = vec![0.0; self.n_topics * n_terms];

            for d in 0..n_docs {
                for v in 0..n_terms {
                    let count = dtm.get(d, v);
                    if count <= 0.0 {
                        continue;
                    }

                    // p(z | d, w) up to normalization
                    let mut topic_probs = vec![0.0; self.n_topics];
                    let mut sum = 0.0;
                    for k in 0..self.n_topics {
                        let p = doc_topic[d * self.n_topics + k] * topic_term[k * n_terms + v];
                        topic_probs[k] = p;
                        sum += p;
                    }
                    if sum <= 1e-10 {
                        continue;
                    }

                    for k in 0..self.n_topics {
                        let responsibility = count * topic_probs[k] / sum;
                        next_doc_topic[d * self.n_topics + k] += responsibility;
                        next_topic_term[k * n_terms + v] += responsibility;
                    }
                }
            }

            normalize_rows(&mut next_doc_topic, n_docs, self.n_topics);
            normalize_rows(&mut next_topic_term, self.n_topics, n_terms);

            doc_topic = next_doc_topic;
            topic_term = next_topic_term;
        }

        self.doc_topic = Some(Matrix::from_vec(n_docs, self.n_topics, doc_topic)?);
        self.topic_term = Some(Matrix::from_vec(self.n_topics, n_terms, topic_term)?);
        Ok(())
    }

    /// Document-topic probability matrix (`n_docs` x `n_topics`).
    ///
    /// # Errors
    ///
    /// Returns an error when the model is not fitted.
    pub fn document_topics(&self) -> Result<&Matrix> {
        self.doc_topic
            .as_ref()
            .ok_or_else(|| ResenaError::Other("model not fitted; call fit() first".to_string()))
    }

    /// Topic-term weight matrix (`n_topics` x `n_terms`).
    ///
    /// # Errors
    ///
    /// Returns an error when the model is not fitted.
    pub fn topic_terms(&self) -> Result<&Matrix> {
        self.topic_term
            .as_ref()
            .ok_or_else(|| ResenaError::Other("model not fitted; call fit() first".to_string()))
    }

    /// Top-weighted terms per topic, descending.
    ///
    /// # Errors
    ///
    /// Returns an error when the model is not fitted or the vocabulary
    /// length doesn't match the term dimension.
    pub fn top_terms(&self, vocabulary: &[String], n_terms: usize) -> Result<Vec<Vec<(String, f64)>>> {
        let topic_term = self.topic_terms()?;
        if vocabulary.len() != topic_term.n_cols() {
            return Err(ResenaError::DimensionMismatch {
                expected: format!("{} vocabulary terms", topic_term.n_cols()),
                actual: format!("{} vocabulary terms", vocabulary.len()),
            });
        }

        let mut result = Vec::with_capacity(self.n_topics);
        for topic_idx in 0..self.n_topics {
            let mut scored: Vec<(String, f64)> = vocabulary
                .iter()
                .enumerate()
                .map(|(term_idx, term)| (term.clone(), topic_term.get(topic_idx, term_idx)))
                .collect();
            // Stable sort keeps vocabulary order on equal weights.
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            scored.truncate(n_terms);
            result.push(scored);
        }
        Ok(result)
    }

    /// Dominant topic per document: argmax of the document's topic row,
    /// lowest index on ties.
    ///
    /// # Errors
    ///
    /// Returns an error when the model is not fitted.
    pub fn dominant_topics(&self) -> Result<Vec<usize>> {
        let doc_topic = self.document_topics()?;
        let mut assignments = Vec::with_capacity(doc_topic.n_rows());
        for d in 0..doc_topic.n_rows() {
            let row = doc_topic.row(d);
            let mut best = 0;
            let mut best_p = row[0];
            for (k, &p) in row.iter().enumerate().skip(1) {
                if p > best_p {
                    best = k;
                    best_p = p;
                }
            }
            assignments.push(best);
        }
        Ok(assignments)
    }

    /// Seeded LCG noise in [0, 1) for reproducible initialization.
    fn seeded_noise(&self, idx: usize) -> f64 {
        let a: u64 = 1_664_525;
        let c: u64 = 1_013_904_223;
        let m: u64 = 1 << 32;
        let x = a
            .wrapping_mul(self.random_seed.wrapping_add(idx as u64))
            .wrapping_add(c)
            % m;
        x as f64 / m as f64
    }
}

/// Normalize each row to sum to 1 (rows summing to ~0 are left alone).
fn normalize_rows(data: &mut [f64], n_rows: usize, n_cols: usize) {
    for row in 0..n_rows {
        let start = row * n_cols;
        let end = start + n_cols;
        let sum: f64 = data[start..end].iter().sum();
        if sum > 1e-10 {
            for value in &mut data[start..end] {
                *value /= sum;
            }
        }
    }
}
