//! Debounce
//!
//! Timer-based coalescing: only the last item of a burst survives, and it is
//! released once `window` has passed without a newer item.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queue `item` and restart the quiet window at `at`.
    ///
    /// A pending item from the same burst is dropped. One whose window had
    /// already elapsed by `at` belongs to an earlier burst and is handed back
    /// with its due time so the caller can still fire it.
    pub fn push(&mut self, item: T, at: Instant) -> Option<(T, Instant)> {
        let overdue = self.pending.take().filter(|(_, due)| *due <= at);
        self.pending = Some((item, at + self.window));
        overdue
    }

    /// When the pending item becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Release the pending item if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(due) if now >= due => self.pending.take().map(|(item, _)| item),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(item, _)| item)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
