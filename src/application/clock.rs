// Ports for the time and identity sources the pipeline depends on
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

pub trait AlertIdSource: Send + Sync {
    /// Ids need to be unique, not stable across invocations.
    fn next_id(&self) -> String;
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Deterministic ids: `alert-1`, `alert-2`, ...
#[derive(Debug, Default)]
pub struct SequentialAlertIds {
    next: AtomicU64,
}

impl AlertIdSource for SequentialAlertIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("alert-{}", n)
    }
}
