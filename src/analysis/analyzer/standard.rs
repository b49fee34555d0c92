//! Standard analyzer that provides good defaults for most corpora.
//!
//! # Pipeline
//!
//! 1. UnicodeWordTokenizer (Unicode word boundaries)
//! 2. LowercaseFilter
//! 3. StopFilter (33 common English stop words, or a user-supplied list)
//!
//! # Examples
//!
//! ```
//! use doccat::analysis::analyzer::Analyzer;
//! use doccat::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new();
//! let terms = analyzer.terms("Hello the world and test").unwrap();
//!
//! // "the" and "and" are filtered out as stop words
//! assert_eq!(terms, vec!["hello", "world", "test"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// A standard analyzer that provides good defaults for most corpora.
///
/// Uses the Unicode word tokenizer with lowercase and stop word filtering.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()));

        StandardAnalyzer { inner: analyzer }
    }

    /// Create a new standard analyzer without stop word filtering.
    pub fn without_stop_words() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));

        StandardAnalyzer { inner: analyzer }
    }

    /// Create a new standard analyzer with stop words loaded from a file.
    ///
    /// The word list is an optional resource: if the file cannot be read,
    /// a warning is logged and the analyzer falls back to the default
    /// English stop word list instead of failing the run.
    pub fn with_stop_word_file<P: AsRef<Path>>(path: P) -> Self {
        let stop_filter = match StopFilter::from_file(path.as_ref()) {
            Ok(filter) => filter,
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "stop word file unavailable, using default list"
                );
                StopFilter::new()
            }
        };

        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter));

        StandardAnalyzer { inner: analyzer }
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
