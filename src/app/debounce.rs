use std::time::{Duration, Instant};

/// Holds back a changing value until it has been left alone for `quiet`.
///
/// Every `push` replaces the pending value and restarts the wait, so a burst
/// of updates yields only its last value.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Releases the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Releases the pending value without waiting.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}
