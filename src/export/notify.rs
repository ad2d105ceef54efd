//! Transient export status notifications.
//!
//! The lifecycle is toast-like: a pending notification while the export
//! runs, then a success or failure message. A guard dismisses the pending
//! notification on every exit path, including unwinds.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Receiver for user-visible export status updates.
pub trait StatusSink {
    fn pending(&self, message: &str);
    /// The pending notification went away. Called exactly once per export.
    fn cleared(&self);
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Console-backed sink; status lines go through the log facade.
#[derive(Debug, Default)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn pending(&self, message: &str) {
        log::info!("{message}");
    }

    fn cleared(&self) {
        log::debug!("status cleared");
    }

    fn success(&self, message: &str) {
        log::info!("{message}");
    }

    fn failure(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Live pending notification. Dropping the guard dismisses it; calling
/// [`PendingGuard::dismiss`] first makes the drop a no-op, so the sink sees
/// exactly one `cleared` either way.
pub struct PendingGuard<'a> {
    sink: &'a dyn StatusSink,
    dismissed: bool,
}

impl<'a> PendingGuard<'a> {
    pub fn begin(sink: &'a dyn StatusSink, message: &str) -> Self {
        sink.pending(message);
        Self {
            sink,
            dismissed: false,
        }
    }

    pub fn dismiss(mut self) {
        self.clear_once();
    }

    fn clear_once(&mut self) {
        if !self.dismissed {
            self.dismissed = true;
            self.sink.cleared();
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.clear_once();
    }
}

/// Test double counting each callback.
#[derive(Debug, Default)]
pub struct CountingStatus {
    pub pending: AtomicUsize,
    pub cleared: AtomicUsize,
    pub success: AtomicUsize,
    pub failure: AtomicUsize,
}

impl StatusSink for CountingStatus {
    fn pending(&self, _message: &str) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    fn cleared(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }

    fn success(&self, _message: &str) {
        self.success.fetch_add(1, Ordering::SeqCst);
    }

    fn failure(&self, _message: &str) {
        self.failure.fetch_add(1, Ordering::SeqCst);
    }
}

impl CountingStatus {
    pub fn cleared_count(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_once_when_dismissed() {
        let sink = CountingStatus::default();
        let guard = PendingGuard::begin(&sink, "working");
        guard.dismiss();
        assert_eq!(sink.pending.load(Ordering::SeqCst), 1);
        assert_eq!(sink.cleared_count(), 1);
    }

    #[test]
    fn guard_clears_once_on_drop() {
        let sink = CountingStatus::default();
        {
            let _guard = PendingGuard::begin(&sink, "working");
        }
        assert_eq!(sink.cleared_count(), 1);
    }

    #[test]
    fn guard_clears_once_on_unwind() {
        let sink = CountingStatus::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = PendingGuard::begin(&sink, "working");
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(sink.cleared_count(), 1);
    }
}
