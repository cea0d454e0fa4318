//! Request Tracker
//!
//! Last-request-wins bookkeeping for views that reload data. Each load takes
//! a ticket; when its result arrives it is applied only if no newer load has
//! started since. Nothing is cancelled, stale results are just dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues tickets and remembers the newest one
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

/// Proof that a request was started, checked when its result arrives
#[derive(Debug, Clone)]
pub struct RequestTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket
    pub fn begin(&self) -> RequestTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Supersede every outstanding ticket without starting a new request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());

        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_invalidate_supersedes_everything() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();

        tracker.invalidate();
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_clones_share_the_same_counter() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();

        let _ = tracker.clone().begin();
        assert!(!ticket.is_current());
    }
}
