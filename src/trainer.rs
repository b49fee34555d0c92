//! Concurrent corpus trainer.
//!
//! The trainer scans a labeled corpus (one directory per class), then runs a
//! bounded worker pool with exactly one worker per class. Each worker
//! tokenizes every document in its class directory and folds the term counts
//! and class totals into shared aggregation state. The initiating caller
//! blocks on the pool scope until every worker has finished, then hands the
//! raw counts to the model builder.
//!
//! Per-document I/O failures are logged and skipped; they never abort the
//! class or the run. Only corpus-structure violations abort training.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ahash::AHashMap;
use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use crate::analysis::analyzer::Analyzer;
use crate::cancel::CancellationToken;
use crate::corpus::{ClassDir, scan_corpus};
use crate::error::{DoccatError, Result};
use crate::model::{TrainedModel, build_model};

/// Upper bound on concurrent class workers.
pub const DEFAULT_MAX_WORKERS: usize = 7;

/// Configuration for the corpus trainer.
#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Maximum number of concurrent class workers. The effective pool size
    /// is `min(class_count, max_workers)`.
    pub max_workers: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

/// Per-class metadata accumulated during training.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassStats {
    /// The class name (directory base name).
    pub name: String,
    /// Number of documents successfully tokenized for this class.
    pub doc_count: u64,
    /// Sum of token counts across this class's documents.
    pub total_tokens: u64,
}

/// Raw aggregation output of a training run, input to the model builder.
#[derive(Debug)]
pub struct RawCounts {
    /// term -> per-class occurrence counts, one slot per class index.
    pub term_counts: AHashMap<String, Vec<u64>>,
    /// Per-class metadata, indexed by class index.
    pub classes: Vec<ClassStats>,
}

/// Summary of a completed training run.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    /// Number of classes trained.
    pub classes: usize,
    /// Documents successfully tokenized across all classes.
    pub documents_trained: u64,
    /// Documents skipped because of read or analysis failures.
    pub documents_skipped: u64,
    /// Total tokens observed across all classes.
    pub total_tokens: u64,
    /// Per-class metadata, indexed by class index.
    pub per_class: Vec<ClassStats>,
    /// Wall-clock training time.
    pub duration: Duration,
}

/// Per-worker completion report, sent back over a channel.
struct WorkerReport {
    docs_trained: u64,
    docs_skipped: u64,
}

/// Trains a Naive Bayes model from a labeled corpus directory.
pub struct CorpusTrainer {
    analyzer: Arc<dyn Analyzer>,
    config: TrainerConfig,
}

impl CorpusTrainer {
    /// Create a new trainer with the given analyzer and configuration.
    pub fn new(analyzer: Arc<dyn Analyzer>, config: TrainerConfig) -> Self {
        CorpusTrainer { analyzer, config }
    }

    /// Create a new trainer with the default configuration.
    pub fn with_defaults(analyzer: Arc<dyn Analyzer>) -> Self {
        Self::new(analyzer, TrainerConfig::default())
    }

    /// Train over the corpus rooted at `root` and return the raw counts.
    ///
    /// Blocks until every class worker has completed. Fails with
    /// [`DoccatError::InvalidCorpus`] if the corpus layout is violated and
    /// with [`DoccatError::OperationCancelled`] if `cancel` fires mid-run.
    pub fn train(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<(RawCounts, TrainingReport)> {
        let start = Instant::now();

        let classes = scan_corpus(root)?;
        let class_count = classes.len();
        let workers = class_count.min(self.config.max_workers).max(1);

        debug!(
            corpus = %root.display(),
            classes = class_count,
            workers,
            "starting corpus training"
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("corpus-train-{i}"))
            .build()
            .map_err(|e| DoccatError::thread_pool(format!("failed to create worker pool: {e}")))?;

        // The two aggregation maps are the only shared mutable state. Each
        // mutex is owned by the structure it protects; the per-class stats
        // vector is preallocated so workers only ever write their own slot.
        let term_counts: Mutex<AHashMap<String, Vec<u64>>> = Mutex::new(AHashMap::new());
        let class_stats: Mutex<Vec<ClassStats>> = Mutex::new(
            classes
                .iter()
                .map(|class| ClassStats {
                    name: class.name.clone(),
                    ..ClassStats::default()
                })
                .collect(),
        );

        let (tx, rx) = unbounded::<WorkerReport>();

        // The scope is the join barrier: it returns only after every
        // spawned worker has completed.
        pool.scope(|scope| {
            for class in &classes {
                let tx = tx.clone();
                let analyzer = Arc::clone(&self.analyzer);
                let cancel = cancel.clone();
                let term_counts = &term_counts;
                let class_stats = &class_stats;
                scope.spawn(move |_| {
                    let report = train_class(
                        class,
                        class_count,
                        analyzer.as_ref(),
                        term_counts,
                        class_stats,
                        &cancel,
                    );
                    let _ = tx.send(report);
                });
            }
        });
        drop(tx);

        if cancel.is_cancelled() {
            return Err(DoccatError::cancelled("corpus training cancelled"));
        }

        let mut documents_trained = 0;
        let mut documents_skipped = 0;
        for report in rx.try_iter() {
            documents_trained += report.docs_trained;
            documents_skipped += report.docs_skipped;
        }

        let raw = RawCounts {
            term_counts: term_counts.into_inner(),
            classes: class_stats.into_inner(),
        };

        let report = TrainingReport {
            classes: class_count,
            documents_trained,
            documents_skipped,
            total_tokens: raw.classes.iter().map(|c| c.total_tokens).sum(),
            per_class: raw.classes.clone(),
            duration: start.elapsed(),
        };

        debug!(
            classes = report.classes,
            documents = report.documents_trained,
            skipped = report.documents_skipped,
            vocabulary = raw.term_counts.len(),
            "corpus training finished"
        );

        Ok((raw, report))
    }

    /// Train over the corpus rooted at `root` and build the final model.
    pub fn train_model(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<(TrainedModel, TrainingReport)> {
        let (raw, report) = self.train(root, cancel)?;
        Ok((build_model(raw), report))
    }
}

/// Process a single class directory: tokenize every document and fold the
/// counts into the shared aggregation state.
fn train_class(
    class: &ClassDir,
    class_count: usize,
    analyzer: &dyn Analyzer,
    term_counts: &Mutex<AHashMap<String, Vec<u64>>>,
    class_stats: &Mutex<Vec<ClassStats>>,
    cancel: &CancellationToken,
) -> WorkerReport {
    let mut report = WorkerReport {
        docs_trained: 0,
        docs_skipped: 0,
    };

    let entries = match fs::read_dir(&class.path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(class = %class.name, error = %e, "failed to enumerate class directory");
            return report;
        }
    };

    let mut class_token_total: u64 = 0;
    for entry in entries {
        if cancel.is_cancelled() {
            break;
        }

        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!(class = %class.name, error = %e, "failed to read directory entry, skipping");
                report.docs_skipped += 1;
                continue;
            }
        };

        if !path.is_file() {
            warn!(path = %path.display(), "skipping non-file entry in class directory");
            continue;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(document = %path.display(), error = %e, "failed to read document, skipping");
                report.docs_skipped += 1;
                continue;
            }
        };

        let terms = match analyzer.terms(&text) {
            Ok(terms) => terms,
            Err(e) => {
                warn!(document = %path.display(), error = %e, "failed to analyze document, skipping");
                report.docs_skipped += 1;
                continue;
            }
        };

        {
            // The fetch-or-allocate-then-increment sequence must stay inside
            // a single lock acquisition: two classes that first touch the
            // same term concurrently would otherwise lose an update.
            let mut counts = term_counts.lock();
            for term in &terms {
                let slots = counts
                    .entry(term.clone())
                    .or_insert_with(|| vec![0; class_count]);
                slots[class.index] += 1;
            }
        }

        class_token_total += terms.len() as u64;
        report.docs_trained += 1;
    }

    {
        let mut stats = class_stats.lock();
        let slot = &mut stats[class.index];
        slot.doc_count = report.docs_trained;
        slot.total_tokens = class_token_total;
    }

    report
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::analysis::analyzer::standard::StandardAnalyzer;
    use crate::error::DoccatError;

    fn write_doc(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn two_class_corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let fruit = dir.path().join("fruit");
        let cars = dir.path().join("cars");
        fs::create_dir(&fruit).unwrap();
        fs::create_dir(&cars).unwrap();
        write_doc(&fruit, "a.txt", "apple apple fruit");
        write_doc(&cars, "b.txt", "car engine car");
        dir
    }

    #[test]
    fn test_train_counts_terms_per_class() {
        let dir = two_class_corpus();
        let trainer = CorpusTrainer::with_defaults(Arc::new(StandardAnalyzer::new()));
        let (raw, report) = trainer
            .train(dir.path(), &CancellationToken::new())
            .unwrap();

        // Classes are sorted by name: cars=0, fruit=1.
        assert_eq!(raw.classes[0].name, "cars");
        assert_eq!(raw.classes[1].name, "fruit");
        assert_eq!(raw.term_counts["apple"], vec![0, 2]);
        assert_eq!(raw.term_counts["car"], vec![2, 0]);
        assert_eq!(raw.term_counts["fruit"], vec![0, 1]);
        assert_eq!(raw.classes[0].total_tokens, 3);
        assert_eq!(raw.classes[1].total_tokens, 3);
        assert_eq!(report.documents_trained, 2);
        assert_eq!(report.documents_skipped, 0);
    }

    #[test]
    fn test_train_skips_unreadable_document() {
        let dir = two_class_corpus();
        // Invalid UTF-8 bytes make read_to_string fail for this document.
        fs::write(dir.path().join("fruit").join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

        let trainer = CorpusTrainer::with_defaults(Arc::new(StandardAnalyzer::new()));
        let (raw, report) = trainer
            .train(dir.path(), &CancellationToken::new())
            .unwrap();

        assert_eq!(report.documents_trained, 2);
        assert_eq!(report.documents_skipped, 1);
        // The readable documents still contribute.
        assert_eq!(raw.term_counts["apple"], vec![0, 2]);
    }

    #[test]
    fn test_train_cancelled() {
        let dir = two_class_corpus();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let trainer = CorpusTrainer::with_defaults(Arc::new(StandardAnalyzer::new()));
        let err = trainer.train(dir.path(), &cancel).unwrap_err();
        assert!(matches!(err, DoccatError::OperationCancelled(_)));
    }

    #[test]
    fn test_train_rejects_invalid_corpus() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stray.txt"), "not a class").unwrap();

        let trainer = CorpusTrainer::with_defaults(Arc::new(StandardAnalyzer::new()));
        let err = trainer
            .train(dir.path(), &CancellationToken::new())
            .unwrap_err();
        assert!(matches!(err, DoccatError::InvalidCorpus(_)));
    }
}
