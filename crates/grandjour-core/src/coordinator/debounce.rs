//! Debounced persistence writes.
//!
//! Rapid successive edits (a drag-drop session, repeated duration nudges)
//! would otherwise each issue their own write. The debouncer coalesces
//! them: each scheduled save cancels the previous pending one and waits
//! out the delay, so only the last write of a burst lands. The in-memory
//! timeline remains the source of truth regardless of debounce state.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

/// Default delay before a scheduled save fires.
pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces rapid successive saves into a single write, last write wins.
pub struct SaveDebouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SaveDebouncer {
    /// Create a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a save, cancelling any previously pending one.
    ///
    /// Must be called within a tokio runtime.
    pub fn schedule<F, Fut>(&self, save: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            save().await;
        });

        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Wait for the pending save, if any, to run to completion.
    pub async fn flush(&self) {
        let handle = {
            let mut pending = match self.pending.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            pending.take()
        };
        if let Some(handle) = handle {
            // An aborted or panicked save surfaces as a join error; there
            // is nothing left to flush either way.
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_rapid_schedules_coalesce_to_last_write() {
        let debouncer = SaveDebouncer::new(Duration::from_millis(20));
        let count = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        for value in 1..=3 {
            let count = Arc::clone(&count);
            let last = Arc::clone(&last);
            debouncer.schedule(move || async move {
                count.fetch_add(1, Ordering::SeqCst);
                last.store(value, Ordering::SeqCst);
            });
        }

        debouncer.flush().await;
        time::sleep(Duration::from_millis(60)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_spaced_schedules_each_fire() {
        let debouncer = SaveDebouncer::new(Duration::from_millis(10));
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let count = Arc::clone(&count);
            debouncer.schedule(move || async move {
                count.fetch_add(1, Ordering::SeqCst);
            });
            debouncer.flush().await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_flush_without_pending_save() {
        let debouncer = SaveDebouncer::new(Duration::from_millis(10));
        debouncer.flush().await;
    }
}
