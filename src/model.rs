//! Probability model builder and the trained model.
//!
//! [`build_model`] turns the raw term/class counts produced by the trainer
//! into an immutable [`TrainedModel`]: add-one (Laplace) smoothed conditional
//! probabilities over the full training vocabulary, plus class priors
//! estimated from document counts. Building is a pure function of the raw
//! counts; the only nondeterminism in the whole pipeline enters earlier, at
//! class-index assignment time.

use ahash::AHashMap;

use crate::trainer::RawCounts;

/// The immutable output of training, shared read-only across any number of
/// concurrent classification operations.
#[derive(Clone, Debug)]
pub struct TrainedModel {
    class_names: Vec<String>,
    priors: Vec<f64>,
    class_total_tokens: Vec<u64>,
    vocabulary_size: usize,
    cond_prob: AHashMap<String, Vec<f64>>,
    oov_log: Vec<f64>,
}

impl TrainedModel {
    /// Number of classes in the model.
    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }

    /// Class name for the given class index.
    pub fn class_name(&self, index: usize) -> &str {
        &self.class_names[index]
    }

    /// Ordered class names, indexed by class index.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Class priors (document count ratio). Sums to 1.0 within floating
    /// point tolerance for any non-empty corpus.
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// Total token count per class.
    pub fn class_total_tokens(&self) -> &[u64] {
        &self.class_total_tokens
    }

    /// Number of distinct terms observed during training.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Per-class conditional probabilities for a term, or `None` if the term
    /// was never observed during training.
    pub fn conditional_probability(&self, term: &str) -> Option<&[f64]> {
        self.cond_prob.get(term).map(|v| v.as_slice())
    }

    /// Log of the smoothed fallback probability used for terms outside the
    /// training vocabulary: `ln(1 / (totalTokens[i] + vocabularySize))`.
    pub fn oov_log(&self, index: usize) -> f64 {
        self.oov_log[index]
    }
}

/// Build a [`TrainedModel`] from raw training counts.
///
/// For term `t` and class `i`:
///
/// ```text
/// P(t|i) = (rawCount[t][i] + 1) / (vocabularySize + totalTokens[i])
/// ```
///
/// and `prior[i] = classDocCount[i] / totalDocs`.
pub fn build_model(raw: RawCounts) -> TrainedModel {
    let class_count = raw.classes.len();
    let vocabulary_size = raw.term_counts.len();

    let total_docs: u64 = raw.classes.iter().map(|c| c.doc_count).sum();
    let priors: Vec<f64> = raw
        .classes
        .iter()
        .map(|c| {
            if total_docs == 0 {
                0.0
            } else {
                c.doc_count as f64 / total_docs as f64
            }
        })
        .collect();

    let class_total_tokens: Vec<u64> = raw.classes.iter().map(|c| c.total_tokens).collect();

    let denominators: Vec<f64> = class_total_tokens
        .iter()
        .map(|&total| (vocabulary_size as u64 + total) as f64)
        .collect();

    let mut cond_prob = AHashMap::with_capacity(vocabulary_size);
    for (term, counts) in raw.term_counts {
        let probs: Vec<f64> = (0..class_count)
            .map(|i| (counts[i] as f64 + 1.0) / denominators[i])
            .collect();
        cond_prob.insert(term, probs);
    }

    let oov_log: Vec<f64> = denominators.iter().map(|&d| (1.0 / d).ln()).collect();

    TrainedModel {
        class_names: raw.classes.into_iter().map(|c| c.name).collect(),
        priors,
        class_total_tokens,
        vocabulary_size,
        cond_prob,
        oov_log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::ClassStats;

    fn raw_two_classes() -> RawCounts {
        let mut term_counts = AHashMap::new();
        term_counts.insert("apple".to_string(), vec![2, 0]);
        term_counts.insert("fruit".to_string(), vec![1, 0]);
        term_counts.insert("car".to_string(), vec![0, 2]);
        term_counts.insert("engine".to_string(), vec![0, 1]);

        RawCounts {
            term_counts,
            classes: vec![
                ClassStats {
                    name: "a".to_string(),
                    doc_count: 1,
                    total_tokens: 3,
                },
                ClassStats {
                    name: "b".to_string(),
                    doc_count: 1,
                    total_tokens: 3,
                },
            ],
        }
    }

    #[test]
    fn test_priors_sum_to_one() {
        let model = build_model(raw_two_classes());
        let sum: f64 = model.priors().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_conditional_probabilities_in_open_unit_interval() {
        let model = build_model(raw_two_classes());
        for term in ["apple", "fruit", "car", "engine"] {
            for &p in model.conditional_probability(term).unwrap() {
                assert!(p > 0.0 && p < 1.0, "P({term}) = {p} out of range");
            }
        }
    }

    #[test]
    fn test_laplace_smoothing_values() {
        let model = build_model(raw_two_classes());

        // vocabulary = 4, totalTokens = 3 per class: denominator 7.
        let apple = model.conditional_probability("apple").unwrap();
        assert!((apple[0] - 3.0 / 7.0).abs() < 1e-12);
        assert!((apple[1] - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_oov_log_matches_smoothing_denominator() {
        let model = build_model(raw_two_classes());
        assert!((model.oov_log(0) - (1.0f64 / 7.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_term_has_no_entry() {
        let model = build_model(raw_two_classes());
        assert!(model.conditional_probability("spaceship").is_none());
        assert_eq!(model.vocabulary_size(), 4);
    }

    #[test]
    fn test_empty_class_counts_yield_zero_priors() {
        let raw = RawCounts {
            term_counts: AHashMap::new(),
            classes: vec![
                ClassStats {
                    name: "a".to_string(),
                    ..ClassStats::default()
                },
                ClassStats {
                    name: "b".to_string(),
                    ..ClassStats::default()
                },
            ],
        };
        let model = build_model(raw);
        assert_eq!(model.priors(), &[0.0, 0.0]);
        assert_eq!(model.vocabulary_size(), 0);
    }
}
