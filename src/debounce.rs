//! Cancellable debounce timer.
//!
//! Bounds request volume for search-as-you-type: each keystroke schedules
//! the fetch after a short delay, and the next keystroke cancels the
//! previous pending one, so only the final term in a burst reaches the
//! network.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// One debounce slot: at most one action pending at a time.
///
/// Scheduling requires a running tokio runtime. Under `tokio::time::pause`
/// the delay is virtual, so tests never sleep on the wall clock.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` to run after the delay, cancelling any action
    /// scheduled earlier that has not fired yet.
    pub fn call<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let token = CancellationToken::new();
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => action().await,
            }
        });
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        if let Some(token) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }
}
