//! RuntimeState - shared mutable configuration and health metrics
//!
//! The only state touched by more than one task: the batch-size threshold
//! (written by the control surface, read by the batcher on every append) and
//! the health metrics (written by the batcher after each successful flush,
//! read by the control surface). Guarded by reader/writer locks; constructed
//! once at startup and shared by `Arc`, never ambient.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::ContractError;

/// Health metrics as seen by the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthSnapshot {
    /// Cumulative count of records in committed batches
    pub processed_count: u64,

    /// Time of the last successful flush, `None` before the first
    pub last_processed: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct HealthMetrics {
    processed_count: u64,
    last_processed: Option<DateTime<Utc>>,
}

/// Shared runtime state for the pipeline
#[derive(Debug)]
pub struct RuntimeState {
    batch_size: RwLock<usize>,
    metrics: RwLock<HealthMetrics>,
}

impl RuntimeState {
    /// Create state with the given initial batch-size threshold
    ///
    /// # Errors
    /// Rejects an initial threshold below 1.
    pub fn new(batch_size: usize) -> Result<Self, ContractError> {
        if batch_size < 1 {
            return Err(ContractError::config_validation(
                "batch.size",
                format!("batch size must be >= 1, got {batch_size}"),
            ));
        }
        Ok(Self {
            batch_size: RwLock::new(batch_size),
            metrics: RwLock::new(HealthMetrics::default()),
        })
    }

    /// Current batch-size threshold
    pub fn batch_size(&self) -> usize {
        *self
            .batch_size
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the batch-size threshold
    ///
    /// Applies only to future size checks; an in-progress batch is never
    /// truncated retroactively.
    ///
    /// # Errors
    /// Rejects values below 1 without mutating state.
    pub fn set_batch_size(&self, batch_size: usize) -> Result<(), ContractError> {
        if batch_size < 1 {
            return Err(ContractError::config_validation(
                "batchSize",
                format!("batch size must be >= 1, got {batch_size}"),
            ));
        }
        *self
            .batch_size
            .write()
            .unwrap_or_else(PoisonError::into_inner) = batch_size;
        Ok(())
    }

    /// Record a successful flush of `count` records at the current time
    pub fn record_flush(&self, count: usize) {
        self.record_flush_at(count, Utc::now());
    }

    /// Record a successful flush at an explicit time (used by tests)
    pub fn record_flush_at(&self, count: usize, at: DateTime<Utc>) {
        let mut metrics = self
            .metrics
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        metrics.processed_count += count as u64;
        metrics.last_processed = Some(at);
    }

    /// Snapshot of the health metrics
    pub fn health(&self) -> HealthSnapshot {
        let metrics = self.metrics.read().unwrap_or_else(PoisonError::into_inner);
        HealthSnapshot {
            processed_count: metrics.processed_count,
            last_processed: metrics.last_processed,
        }
    }
}
