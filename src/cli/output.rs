//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{DoccatArgs, OutputFormat};
use crate::error::Result;

/// Per-class tally in a classification summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassCount {
    pub name: String,
    pub documents: u64,
}

/// Result structure for classification runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifySummary {
    pub documents_classified: u64,
    pub documents_skipped: u64,
    pub per_class: Vec<ClassCount>,
    pub results_root: String,
    pub training_ms: u64,
    pub classification_ms: u64,
}

/// Per-class statistics for a trained model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassSummary {
    pub name: String,
    pub prior: f64,
    pub documents: u64,
    pub total_tokens: u64,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStats {
    pub classes: Vec<ClassSummary>,
    pub vocabulary_size: usize,
    pub documents_trained: u64,
    pub documents_skipped: u64,
    pub training_ms: u64,
}

/// Print a classification summary in the requested format.
pub fn print_classify_summary(summary: &ClassifySummary, args: &DoccatArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(summary, args),
        OutputFormat::Human => {
            if args.verbosity() == 0 {
                return Ok(());
            }
            println!(
                "Classified {} documents ({} skipped) in {} ms (training {} ms)",
                summary.documents_classified,
                summary.documents_skipped,
                summary.classification_ms,
                summary.training_ms
            );
            for class in &summary.per_class {
                println!("  {:<20} {}", class.name, class.documents);
            }
            println!("Results written under: {}", summary.results_root);
            Ok(())
        }
    }
}

/// Print model statistics in the requested format.
pub fn print_model_stats(stats: &ModelStats, args: &DoccatArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(stats, args),
        OutputFormat::Human => {
            if args.verbosity() == 0 {
                return Ok(());
            }
            println!(
                "Trained {} classes over {} documents ({} skipped) in {} ms",
                stats.classes.len(),
                stats.documents_trained,
                stats.documents_skipped,
                stats.training_ms
            );
            println!("Vocabulary size: {}", stats.vocabulary_size);
            for class in &stats.classes {
                println!(
                    "  {:<20} prior={:.4} documents={} tokens={}",
                    class.name, class.prior, class.documents, class.total_tokens
                );
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T, args: &DoccatArgs) -> Result<()> {
    let rendered = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
