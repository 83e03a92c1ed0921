//! Batcher metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the batch processor
#[derive(Debug, Default)]
pub struct BatcherMetrics {
    /// Total batches committed by the sink
    batches_flushed: AtomicU64,
    /// Total events in committed batches
    events_flushed: AtomicU64,
    /// Total batches dropped because the sink failed
    flush_failures: AtomicU64,
}

impl BatcherMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total batches flushed
    pub fn batches_flushed(&self) -> u64 {
        self.batches_flushed.load(Ordering::Relaxed)
    }

    /// Record a committed batch of `len` events
    pub fn record_flush(&self, len: usize) {
        self.batches_flushed.fetch_add(1, Ordering::Relaxed);
        self.events_flushed.fetch_add(len as u64, Ordering::Relaxed);
    }

    /// Get flush failure count
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    /// Record a dropped batch
    pub fn record_failure(&self) {
        self.flush_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> BatcherSnapshot {
        BatcherSnapshot {
            batches_flushed: self.batches_flushed.load(Ordering::Relaxed),
            events_flushed: self.events_flushed.load(Ordering::Relaxed),
            flush_failures: self.flush_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of batcher metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatcherSnapshot {
    pub batches_flushed: u64,
    pub events_flushed: u64,
    pub flush_failures: u64,
}
