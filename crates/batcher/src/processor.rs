//! BatchProcessor - accumulator loop with dual flush triggers

use std::sync::Arc;
use std::time::Duration;

use contracts::{ChatEvent, ContractError, EventSink, RuntimeState};
use observability::{record_batch_flushed, record_flush_failure};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::metrics::BatcherMetrics;

/// What caused a batch to be drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushTrigger {
    /// Accumulator length reached the threshold after an append
    Size,
    /// Periodic flush timer fired with a non-empty accumulator
    Timer,
    /// Queue closed, remainder drained on the way out
    Shutdown,
}

impl FlushTrigger {
    fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Timer => "timer",
            Self::Shutdown => "shutdown",
        }
    }
}

/// The batch accumulator and flush loop
///
/// Single consumer of the event queue. The threshold is read from
/// [`RuntimeState`] at every size check, so a concurrent change through the
/// control surface takes effect on the next append, never retroactively.
pub struct BatchProcessor<S: EventSink> {
    rx: mpsc::Receiver<ChatEvent>,
    sink: S,
    state: Arc<RuntimeState>,
    flush_interval: Duration,
    cancel: CancellationToken,
    metrics: Arc<BatcherMetrics>,
}

impl<S: EventSink + 'static> BatchProcessor<S> {
    /// Create a processor consuming `rx` and draining into `sink`
    pub fn new(
        rx: mpsc::Receiver<ChatEvent>,
        sink: S,
        state: Arc<RuntimeState>,
        flush_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            rx,
            sink,
            state,
            flush_interval,
            cancel,
            metrics: Arc::new(BatcherMetrics::new()),
        }
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> Arc<BatcherMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Spawn the processor as a background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Run the accumulator loop
    ///
    /// Returns when the queue closes (remainder flushed) or the pipeline is
    /// cancelled (remainder abandoned, at most one in-progress batch lost).
    #[instrument(name = "batch_processor_run", skip(self), fields(sink = %self.sink.name()))]
    pub async fn run(self) {
        let Self {
            mut rx,
            mut sink,
            state,
            flush_interval,
            cancel,
            metrics,
        } = self;

        let mut buffer: Vec<ChatEvent> = Vec::new();
        let mut ticker = interval(flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            flush_interval_secs = flush_interval.as_secs(),
            threshold = state.batch_size(),
            "Batch processor started"
        );

        loop {
            // Biased: queued events are always drained before cancellation
            // is observed, so only the unflushed accumulator can be lost
            tokio::select! {
                biased;
                maybe = rx.recv() => match maybe {
                    Some(event) => {
                        buffer.push(event);
                        // Threshold read at check time, not batch start
                        if buffer.len() >= state.batch_size() {
                            flush(&mut sink, &state, &metrics, &mut buffer, FlushTrigger::Size).await;
                        }
                    }
                    None => {
                        if !buffer.is_empty() {
                            flush(&mut sink, &state, &metrics, &mut buffer, FlushTrigger::Shutdown).await;
                        }
                        debug!("Event queue closed, batch processor exiting");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    // An empty accumulator never opens a transaction
                    if !buffer.is_empty() {
                        flush(&mut sink, &state, &metrics, &mut buffer, FlushTrigger::Timer).await;
                    }
                }
                _ = cancel.cancelled() => {
                    debug!(buffered = buffer.len(), "Batch processor cancelled");
                    break;
                }
            }
        }

        info!(
            batches = metrics.batches_flushed(),
            failures = metrics.flush_failures(),
            "Batch processor stopped"
        );
    }
}

/// Drain-and-swap flush: the batch is moved out of the accumulator before
/// the sink runs, so no event can land in two flushes or be lost between
/// them. A failed batch is dropped, not retried; the pipeline keeps running.
async fn flush<S: EventSink>(
    sink: &mut S,
    state: &RuntimeState,
    metrics: &BatcherMetrics,
    buffer: &mut Vec<ChatEvent>,
    trigger: FlushTrigger,
) {
    let batch = std::mem::take(buffer);

    match sink.write_batch(&batch).await {
        Ok(()) => {
            // Counted by full batch length, matching the health contract
            state.record_flush(batch.len());
            metrics.record_flush(batch.len());
            record_batch_flushed(batch.len(), trigger.as_str());
            debug!(
                batch_len = batch.len(),
                trigger = trigger.as_str(),
                "Batch flushed"
            );
        }
        Err(e) => {
            metrics.record_failure();
            record_flush_failure();
            error!(
                sink = sink.name(),
                batch_len = batch.len(),
                trigger = trigger.as_str(),
                error = %e,
                "Batch flush failed, dropping batch"
            );
        }
    }
}
