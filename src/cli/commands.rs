//! Command implementations for the doccat CLI.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::cache::ModelCache;
use crate::cancel::CancellationToken;
use crate::classifier::Classifier;
use crate::cli::args::{ClassifyArgs, Command, DoccatArgs, StatsArgs};
use crate::cli::output::{
    ClassCount, ClassSummary, ClassifySummary, ModelStats, print_classify_summary,
    print_model_stats,
};
use crate::error::Result;
use crate::sink::FileResultSink;
use crate::trainer::{CorpusTrainer, TrainerConfig, TrainingReport};

/// Execute a CLI command.
pub fn execute_command(args: DoccatArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Stats(stats_args) => stats(stats_args.clone(), &args),
    }
}

/// Build the analyzer shared by training and classification.
fn build_analyzer(stop_words: Option<&PathBuf>) -> Arc<dyn Analyzer> {
    match stop_words {
        Some(path) => Arc::new(StandardAnalyzer::with_stop_word_file(path)),
        None => Arc::new(StandardAnalyzer::new()),
    }
}

/// Train through the cache, then classify the target tree.
fn classify(args: ClassifyArgs, cli_args: &DoccatArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Training on corpus: {}", args.corpus.display());
    }

    let analyzer = build_analyzer(args.stop_words.as_ref());
    let trainer = CorpusTrainer::new(
        Arc::clone(&analyzer),
        TrainerConfig {
            max_workers: args.max_workers,
        },
    );

    let cache = ModelCache::new();
    let cancel = CancellationToken::new();

    let mut training_report: Option<TrainingReport> = None;
    let model = cache.get_or_train(&args.corpus, || {
        let (model, report) = trainer.train_model(&args.corpus, &cancel)?;
        training_report = Some(report);
        Ok(model)
    })?;

    if cli_args.verbosity() > 1 {
        println!("Classifying target: {}", args.target.display());
    }

    let sink = Box::new(FileResultSink::new(args.results_root.clone()));
    let mut classifier = Classifier::new(Arc::clone(&model), analyzer, sink);
    let report = classifier.classify(&args.target, &cancel)?;

    let summary = ClassifySummary {
        documents_classified: report.documents_classified,
        documents_skipped: report.documents_skipped,
        per_class: model
            .class_names()
            .iter()
            .zip(&report.per_class)
            .map(|(name, &documents)| ClassCount {
                name: name.clone(),
                documents,
            })
            .collect(),
        results_root: args.results_root.display().to_string(),
        training_ms: training_report
            .map(|r| r.duration.as_millis() as u64)
            .unwrap_or(0),
        classification_ms: report.duration.as_millis() as u64,
    };

    print_classify_summary(&summary, cli_args)
}

/// Train and print model statistics.
fn stats(args: StatsArgs, cli_args: &DoccatArgs) -> Result<()> {
    let analyzer = build_analyzer(args.stop_words.as_ref());
    let trainer = CorpusTrainer::new(
        analyzer,
        TrainerConfig {
            max_workers: args.max_workers,
        },
    );

    let cancel = CancellationToken::new();
    let (model, report) = trainer.train_model(&args.corpus, &cancel)?;

    let stats = ModelStats {
        classes: report
            .per_class
            .iter()
            .enumerate()
            .map(|(index, class)| ClassSummary {
                name: class.name.clone(),
                prior: model.priors()[index],
                documents: class.doc_count,
                total_tokens: class.total_tokens,
            })
            .collect(),
        vocabulary_size: model.vocabulary_size(),
        documents_trained: report.documents_trained,
        documents_skipped: report.documents_skipped,
        training_ms: report.duration.as_millis() as u64,
    };

    print_model_stats(&stats, cli_args)
}
