//! Dispatch counters — active/completed/error accounting.
//!
//! Updated from arbitrary concurrent dispatch calls; every operation is a
//! single atomic step.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Default)]
pub struct DispatchCounters {
    active: AtomicUsize,
    completed: AtomicU64,
    errors: AtomicU64,
}

impl DispatchCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a dispatch in; returns the start timestamp for latency
    /// accounting.
    pub fn active_increment(&self) -> Instant {
        self.active.fetch_add(1, Ordering::SeqCst);
        Instant::now()
    }

    /// Count a dispatch out; returns the elapsed time since `started`.
    pub fn active_decrement(&self, started: Instant) -> Duration {
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        started.elapsed()
    }

    pub fn error_increment(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            active: self.active(),
            completed: self.completed(),
            errors: self.errors(),
        }
    }
}

/// Point-in-time view, serializable for status surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct CountersSnapshot {
    pub active: usize,
    pub completed: u64,
    pub errors: u64,
}
