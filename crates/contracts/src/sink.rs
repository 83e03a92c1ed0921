//! EventSink trait - batch persistence interface
//!
//! Defines the abstract interface for batch sinks.

use crate::{ChatEvent, ContractError};

/// Batch persistence trait
///
/// The batcher hands each drained batch to a sink. A sink returning `Ok`
/// means the batch was committed (individual records inside may still have
/// failed and been reported through logs/metrics); `Err` means the batch as
/// a whole was not persisted and is dropped by the caller.
#[trait_variant::make(EventSink: Send)]
pub trait LocalEventSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Persist one batch in a single transaction
    ///
    /// # Errors
    /// Returns an error when the transaction cannot be opened or committed.
    async fn write_batch(&mut self, batch: &[ChatEvent]) -> Result<(), ContractError>;
}
