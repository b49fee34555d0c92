//! Cooperative cancellation for training and classification runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable token that signals cancellation to in-flight operations.
///
/// Workers check the token between documents; a cancelled run fails with
/// `DoccatError::OperationCancelled` once the workers have drained.
///
/// # Examples
///
/// ```
/// use doccat::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// let clone = token.clone();
///
/// assert!(!clone.is_cancelled());
/// token.cancel();
/// assert!(clone.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        CancellationToken {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. All clones of this token observe the signal.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_shared_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        token.cancel();
        assert!(clone.is_cancelled());
    }
}
