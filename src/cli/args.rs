//! Command line argument parsing for the doccat CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// doccat - a multinomial Naive Bayes document categorizer
#[derive(Parser, Debug, Clone)]
#[command(name = "doccat")]
#[command(about = "A multinomial Naive Bayes document categorizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct DoccatArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl DoccatArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train on a labeled corpus and classify a target file or directory
    Classify(ClassifyArgs),

    /// Train on a labeled corpus and print model statistics
    Stats(StatsArgs),
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to the training corpus (one directory per class)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// File or directory tree to classify
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Root directory for classification results
    #[arg(short, long, value_name = "DIR", default_value = "bayes-results")]
    pub results_root: PathBuf,

    /// Stop word file (one word per line); falls back to the built-in
    /// English list when missing
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Maximum number of concurrent class workers during training
    #[arg(long, value_name = "N", default_value = "7")]
    pub max_workers: usize,
}

/// Arguments for model statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the training corpus (one directory per class)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Stop word file (one word per line); falls back to the built-in
    /// English list when missing
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Maximum number of concurrent class workers during training
    #[arg(long, value_name = "N", default_value = "7")]
    pub max_workers: usize,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
