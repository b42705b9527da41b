//! Cooperative cancellation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Poll-style cancellation flag shared between a job and whoever may stop it.
///
/// Cancellation is cooperative: setting the flag does nothing by itself,
/// the running engine observes it at its next checkpoint. A handle created
/// with [`child`](Self::child) also reads as cancelled once its parent is.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// New handle that can be cancelled on its own or through `self`.
    pub fn child(&self) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::clone(&self.flag)),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.load(Ordering::Relaxed))
    }
}
