//! Analyzer trait and implementations.
//!
//! Analyzers combine a tokenizer with a chain of token filters to transform
//! raw document text into the normalized term sequence the trainer and
//! classifier consume.
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → … → Filter N → Token Stream
//! ```
//!
//! # Available Implementations
//!
//! - [`StandardAnalyzer`](standard::StandardAnalyzer) - Unicode word tokenizer,
//!   lowercasing, English stop words; good defaults for most corpora
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom tokenizer +
//!   filter chains

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for complete text analysis pipelines.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text into a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the given text and collect the surviving token texts.
    ///
    /// This is the form the trainer and classifier consume: an ordered
    /// sequence of normalized terms with stopped tokens dropped.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect())
    }
}

// Individual analyzer modules
pub mod pipeline;
pub mod standard;

// Re-export all analyzers for convenient access
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
