//! Cooperative cancellation and wall-clock timeouts for a running query.
//!
//! The RAPTOR core never suspends and holds no lock, so cancellation is a
//! best-effort, non-blocking check rather than a signal delivered through an
//! async runtime: a query checks its token between rounds and between
//! batches of routes within a round, and returns a `Cancelled`/`Timeout`
//! outcome without mutating any shared state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Why a query stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    Timeout,
}

/// A cheaply-cloneable handle checked periodically by a running query.
///
/// Cloning shares the same underlying flag, so a caller can hold one clone
/// and cancel the query from another thread while it runs.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that never cancels and never times out.
    #[must_use]
    pub fn none() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    /// A token with a wall-clock budget, starting now.
    #[must_use]
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + Duration::from_millis(timeout_ms)),
        }
    }

    /// Returns a token that shares this token's cancellation flag (so
    /// cancelling either one cancels both) but adds, or tightens, a
    /// wall-clock deadline. Used to combine a caller-supplied token with a
    /// per-query `timeout_ms` from [`crate::config::SearchOptions`] without
    /// the caller having to know about the timeout up front.
    #[must_use]
    pub fn with_deadline(&self, timeout_ms: u64) -> Self {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline: Some(match self.deadline {
                Some(existing) => existing.min(deadline),
                None => deadline,
            }),
        }
    }

    /// Request cancellation. Relaxed ordering is sufficient: this is a
    /// best-effort cooperative check, not a correctness-critical barrier.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns the reason the query should stop, if any.
    #[must_use]
    pub fn check(&self) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Some(StopReason::Timeout);
        }
        None
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::none()
    }
}
