//! Classification scorer and target traversal.
//!
//! The classifier walks a target file or directory tree depth-first,
//! tokenizes each document, scores it against the trained model's per-class
//! log-likelihoods, and appends the prediction to a result sink. The model
//! is read-only; per-document failures are logged and skipped so a batch
//! never aborts mid-run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::analysis::analyzer::Analyzer;
use crate::cancel::CancellationToken;
use crate::error::{DoccatError, Result};
use crate::model::TrainedModel;
use crate::sink::ResultSink;

/// A single classification outcome: a document path and its predicted class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationRecord {
    /// Path of the classified document.
    pub path: PathBuf,
    /// Name of the predicted class.
    pub class_name: String,
}

/// Summary of a completed classification run.
#[derive(Clone, Debug)]
pub struct ClassificationReport {
    /// Documents scored and recorded.
    pub documents_classified: u64,
    /// Documents skipped because of read, analysis, or record-write failures.
    pub documents_skipped: u64,
    /// Number of documents assigned to each class, indexed by class index.
    pub per_class: Vec<u64>,
    /// Wall-clock classification time.
    pub duration: Duration,
}

/// Scores documents against a [`TrainedModel`] and records predictions.
pub struct Classifier {
    model: Arc<TrainedModel>,
    analyzer: Arc<dyn Analyzer>,
    sink: Box<dyn ResultSink>,
}

impl Classifier {
    /// Create a new classifier over a trained model.
    pub fn new(
        model: Arc<TrainedModel>,
        analyzer: Arc<dyn Analyzer>,
        sink: Box<dyn ResultSink>,
    ) -> Self {
        Classifier {
            model,
            analyzer,
            sink,
        }
    }

    /// The model this classifier scores against.
    pub fn model(&self) -> &Arc<TrainedModel> {
        &self.model
    }

    /// Compute the per-class log-likelihood scores for a term sequence.
    ///
    /// For class `i`: `ln(prior[i])` plus, per token, `ln(P(token|i))` for
    /// in-vocabulary tokens and the model's smoothed out-of-vocabulary log
    /// fallback otherwise.
    pub fn score(&self, terms: &[String]) -> Vec<f64> {
        (0..self.model.class_count())
            .map(|i| {
                let mut score = self.model.priors()[i].ln();
                for term in terms {
                    match self.model.conditional_probability(term) {
                        Some(probs) => score += probs[i].ln(),
                        None => score += self.model.oov_log(i),
                    }
                }
                score
            })
            .collect()
    }

    /// Predict the class index for a term sequence.
    ///
    /// The maximum is selected under strict greater-than comparison, so the
    /// lowest index among tied maxima wins.
    pub fn predict(&self, terms: &[String]) -> usize {
        let scores = self.score(terms);
        let mut max_index = 0;
        let mut max_score = f64::NEG_INFINITY;
        for (index, &score) in scores.iter().enumerate() {
            if score > max_score {
                max_index = index;
                max_score = score;
            }
        }
        max_index
    }

    /// Classify every document under `target` (a file or directory tree) and
    /// append each prediction to the result sink.
    ///
    /// Directories are traversed depth-first in filesystem enumeration
    /// order. Fails only on cancellation; per-document failures are logged
    /// and counted as skips.
    pub fn classify(
        &mut self,
        target: &Path,
        cancel: &CancellationToken,
    ) -> Result<ClassificationReport> {
        let start = Instant::now();
        let mut report = ClassificationReport {
            documents_classified: 0,
            documents_skipped: 0,
            per_class: vec![0; self.model.class_count()],
            duration: Duration::ZERO,
        };

        self.classify_tree(target, cancel, &mut report);

        if cancel.is_cancelled() {
            return Err(DoccatError::cancelled("classification cancelled"));
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    fn classify_tree(
        &mut self,
        path: &Path,
        cancel: &CancellationToken,
        report: &mut ClassificationReport,
    ) {
        if cancel.is_cancelled() {
            return;
        }

        if path.is_dir() {
            let entries = match fs::read_dir(path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(directory = %path.display(), error = %e, "failed to enumerate directory, skipping");
                    return;
                }
            };
            for entry in entries {
                match entry {
                    Ok(entry) => self.classify_tree(&entry.path(), cancel, report),
                    Err(e) => {
                        warn!(directory = %path.display(), error = %e, "failed to read directory entry, skipping");
                    }
                }
            }
        } else {
            self.classify_file(path, report);
        }
    }

    fn classify_file(&mut self, path: &Path, report: &mut ClassificationReport) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(document = %path.display(), error = %e, "failed to read document, skipping");
                report.documents_skipped += 1;
                return;
            }
        };

        let terms = match self.analyzer.terms(&text) {
            Ok(terms) => terms,
            Err(e) => {
                warn!(document = %path.display(), error = %e, "failed to analyze document, skipping");
                report.documents_skipped += 1;
                return;
            }
        };

        let index = self.predict(&terms);
        let record = ClassificationRecord {
            path: path.to_path_buf(),
            class_name: self.model.class_name(index).to_string(),
        };

        if let Err(e) = self.sink.append(&record) {
            warn!(document = %path.display(), error = %e, "failed to write classification record, skipping");
            report.documents_skipped += 1;
            return;
        }

        report.documents_classified += 1;
        report.per_class[index] += 1;
    }
}

#[cfg(test)]
mod tests {
    use ahash::AHashMap;

    use super::*;
    use crate::analysis::analyzer::standard::StandardAnalyzer;
    use crate::model::build_model;
    use crate::sink::MemoryResultSink;
    use crate::trainer::{ClassStats, RawCounts};

    fn fruit_car_model() -> TrainedModel {
        // Class 0 "a": apple apple fruit; class 1 "b": car engine car.
        let mut term_counts = AHashMap::new();
        term_counts.insert("apple".to_string(), vec![2, 0]);
        term_counts.insert("fruit".to_string(), vec![1, 0]);
        term_counts.insert("car".to_string(), vec![0, 2]);
        term_counts.insert("engine".to_string(), vec![0, 1]);

        build_model(RawCounts {
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
        })
    }

    fn classifier_over(model: TrainedModel) -> Classifier {
        Classifier::new(
            Arc::new(model),
            Arc::new(StandardAnalyzer::new()),
            Box::new(MemoryResultSink::new()),
        )
    }

    #[test]
    fn test_predict_prefers_matching_class() {
        let classifier = classifier_over(fruit_car_model());
        assert_eq!(classifier.predict(&["apple".to_string()]), 0);
        assert_eq!(classifier.predict(&["car".to_string()]), 1);
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        // Perfectly symmetric model: identical vocabulary and counts in
        // both classes, equal priors.
        let mut term_counts = AHashMap::new();
        term_counts.insert("shared".to_string(), vec![1, 1]);
        let model = build_model(RawCounts {
            term_counts,
            classes: vec![
                ClassStats {
                    name: "first".to_string(),
                    doc_count: 1,
                    total_tokens: 1,
                },
                ClassStats {
                    name: "second".to_string(),
                    doc_count: 1,
                    total_tokens: 1,
                },
            ],
        });

        let classifier = classifier_over(model);
        assert_eq!(classifier.predict(&[]), 0);
        assert_eq!(classifier.predict(&["shared".to_string()]), 0);
    }

    #[test]
    fn test_oov_token_contributes_logged_fallback() {
        let model = fruit_car_model();
        let expected = model.priors()[0].ln() + model.oov_log(0);

        let classifier = classifier_over(fruit_car_model());
        let scores = classifier.score(&["spaceship".to_string()]);
        assert!((scores[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_score_accumulates_log_probabilities() {
        let model = fruit_car_model();
        let apple = model.conditional_probability("apple").unwrap().to_vec();
        let expected = model.priors()[1].ln() + apple[1].ln() + apple[1].ln();

        let classifier = classifier_over(fruit_car_model());
        let scores = classifier.score(&["apple".to_string(), "apple".to_string()]);
        assert!((scores[1] - expected).abs() < 1e-12);
    }
}
