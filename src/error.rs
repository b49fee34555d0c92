//! Error types for the doccat library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`DoccatError`] enum. Only corpus-structure violations and run-level
//! failures surface here; per-document I/O problems are logged and skipped
//! by the trainer and classifier rather than propagated.
//!
//! # Examples
//!
//! ```
//! use doccat::error::{DoccatError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(DoccatError::invalid_corpus("root is not a directory"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for doccat operations.
///
/// Uses the `thiserror` crate for the `Error` trait implementation and
/// provides convenient constructor methods for the string-carrying variants.
#[derive(Error, Debug)]
pub enum DoccatError {
    /// I/O errors (file operations, directory creation, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The training corpus violates the one-directory-per-class layout.
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Worker pool construction or join errors.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Operation cancelled
    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with DoccatError.
pub type Result<T> = std::result::Result<T, DoccatError>;

impl DoccatError {
    /// Create a new invalid corpus error.
    pub fn invalid_corpus<S: Into<String>>(msg: S) -> Self {
        DoccatError::InvalidCorpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        DoccatError::Analysis(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        DoccatError::ThreadPool(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        DoccatError::OperationCancelled(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        DoccatError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DoccatError::Other(msg.into())
    }
}
