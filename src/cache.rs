//! In-memory model cache keyed by corpus identity.
//!
//! Training is expensive, so repeated classification calls against the same
//! corpus should not re-scan the filesystem. The cache is an explicit object
//! constructed once at startup and passed by reference to the callers that
//! need it; there is no ambient global. Corpus identity is the canonicalized
//! root path compared by value, so two spellings of the same directory share
//! one model.
//!
//! Entries are never invalidated or expired: a corpus that changes on disk
//! without a path change keeps serving the stale model for the lifetime of
//! the process. That is acceptable for a single classification run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{DoccatError, Result};
use crate::model::TrainedModel;

/// A process-lifetime cache of trained models, keyed by canonicalized
/// corpus root path.
#[derive(Debug, Default)]
pub struct ModelCache {
    models: RwLock<AHashMap<PathBuf, Arc<TrainedModel>>>,
}

impl ModelCache {
    /// Create a new, empty cache.
    pub fn new() -> Self {
        ModelCache {
            models: RwLock::new(AHashMap::new()),
        }
    }

    /// Return the cached model for `corpus`, training it via `train` on the
    /// first request.
    ///
    /// On a hit the cached `Arc` is cloned and returned without touching the
    /// filesystem beyond path canonicalization.
    pub fn get_or_train<F>(&self, corpus: &Path, train: F) -> Result<Arc<TrainedModel>>
    where
        F: FnOnce() -> Result<TrainedModel>,
    {
        let key = self.canonical_key(corpus)?;

        if let Some(model) = self.models.read().get(&key) {
            debug!(corpus = %key.display(), "model cache hit");
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(train()?);
        let mut models = self.models.write();
        // A concurrent caller may have trained the same corpus while we did;
        // keep the first stored model so every caller sees one instance.
        let entry = models.entry(key).or_insert_with(|| Arc::clone(&model));
        Ok(Arc::clone(entry))
    }

    /// Look up a model without training on miss.
    pub fn get(&self, corpus: &Path) -> Option<Arc<TrainedModel>> {
        let key = self.canonical_key(corpus).ok()?;
        self.models.read().get(&key).map(Arc::clone)
    }

    /// Number of cached models.
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// Drop every cached model.
    pub fn clear(&self) {
        self.models.write().clear();
    }

    fn canonical_key(&self, corpus: &Path) -> Result<PathBuf> {
        corpus.canonicalize().map_err(|e| {
            DoccatError::invalid_corpus(format!(
                "cannot resolve corpus path {}: {e}",
                corpus.display()
            ))
        })
    }
}
