//! # Batcher
//!
//! The batch accumulator and flush-trigger loop: consumes chat events from
//! the bounded queue, appends them to an in-memory batch, and drains the
//! batch to an [`contracts::EventSink`] when either the size threshold is
//! reached or the periodic flush timer fires.
//!
//! This is the single consumer of the queue; the batch is owned by one task
//! and needs no locking.

mod metrics;
mod processor;

pub use metrics::{BatcherMetrics, BatcherSnapshot};
pub use processor::{BatchProcessor, FlushTrigger};
