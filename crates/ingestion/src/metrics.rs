//! Ingestion metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Ingestion metrics
#[derive(Debug, Default)]
pub struct IngestMetrics {
    /// Total protocol lines read
    pub lines_read: AtomicU64,

    /// Total chat events forwarded into the queue
    pub events_forwarded: AtomicU64,

    /// Total non-chat lines discarded
    pub lines_discarded: AtomicU64,

    /// Total PINGs answered
    pub pings_answered: AtomicU64,
}

impl IngestMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a protocol line read
    pub fn record_line(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an event forwarded into the queue
    pub fn record_forwarded(&self) {
        self.events_forwarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a discarded line
    pub fn record_discarded(&self) {
        self.lines_discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an answered PING
    pub fn record_ping(&self) {
        self.pings_answered.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            events_forwarded: self.events_forwarded.load(Ordering::Relaxed),
            lines_discarded: self.lines_discarded.load(Ordering::Relaxed),
            pings_answered: self.pings_answered.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSnapshot {
    /// Total protocol lines read
    pub lines_read: u64,

    /// Total chat events forwarded into the queue
    pub events_forwarded: u64,

    /// Total non-chat lines discarded
    pub lines_discarded: u64,

    /// Total PINGs answered
    pub pings_answered: u64,
}
