//! # doccat
//!
//! A multinomial Naive Bayes document categorizer for Rust.
//!
//! doccat learns a small set of predefined classes from a labeled corpus
//! (one directory per class) and classifies a stream of unlabeled files
//! into the most probable class.
//!
//! ## Features
//!
//! - Concurrent corpus training with a bounded per-class worker pool
//! - Add-one (Laplace) smoothed conditional probabilities and class priors
//! - Flexible text analysis pipeline (tokenizers, filters, stop words)
//! - In-memory model cache keyed by corpus identity
//! - Pluggable result sinks for classification records
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use doccat::analysis::analyzer::standard::StandardAnalyzer;
//! use doccat::cancel::CancellationToken;
//! use doccat::classifier::Classifier;
//! use doccat::sink::FileResultSink;
//! use doccat::trainer::CorpusTrainer;
//!
//! # fn main() -> doccat::error::Result<()> {
//! let analyzer = Arc::new(StandardAnalyzer::new());
//! let cancel = CancellationToken::new();
//!
//! let trainer = CorpusTrainer::with_defaults(analyzer.clone());
//! let (model, _report) = trainer.train_model("corpus".as_ref(), &cancel)?;
//!
//! let sink = Box::new(FileResultSink::new("bayes-results"));
//! let mut classifier = Classifier::new(Arc::new(model), analyzer, sink);
//! classifier.classify("inbox".as_ref(), &cancel)?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cache;
pub mod cancel;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod model;
pub mod sink;
pub mod trainer;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
