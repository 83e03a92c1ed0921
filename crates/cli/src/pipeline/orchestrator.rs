//! Pipeline orchestrator - wires ingestion, batching, storage, and control.
//!
//! Ownership of the shutdown token: the `run` command cancels it on a
//! signal, the reader cancels it when the chat stream ends or fails. Either
//! way every component observes the same token and winds down together.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use batcher::BatchProcessor;
use contracts::{RuntimeState, ServiceBlueprint};
use ingestion::{ChatLogin, IrcReader, TcpTransport};
use storage::{ChatStore, SqlSink};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::CliError;

use super::PipelineStats;

/// Main pipeline orchestrator
pub struct Pipeline {
    blueprint: ServiceBlueprint,
    cancel: CancellationToken,
}

impl Pipeline {
    /// Create a new pipeline from a validated blueprint
    pub fn new(blueprint: ServiceBlueprint) -> Self {
        Self {
            blueprint,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the pipeline when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = self.blueprint;
        let cancel = self.cancel;

        // Metrics endpoint (optional)
        if let Some(port) = blueprint.control.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Storage
        info!(url = %blueprint.storage.database_url, "Connecting to store...");
        let store = ChatStore::connect(&blueprint.storage.database_url)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to store at {}",
                    blueprint.storage.database_url
                )
            })?;
        store
            .ensure_schema()
            .await
            .context("Failed to provision schema")?;
        info!("Store ready");

        // Shared runtime state, read by the batcher and mutated by the
        // control surface
        let state = Arc::new(RuntimeState::new(blueprint.batch.size)?);

        // Control server
        let listen_addr: SocketAddr = blueprint.control.listen_addr.parse().map_err(
            |e: std::net::AddrParseError| {
                CliError::control_addr(&blueprint.control.listen_addr, e.to_string())
            },
        )?;
        let control_task = tokio::spawn(control::serve(
            listen_addr,
            Arc::clone(&state),
            cancel.clone(),
        ));

        // Event queue and batch processor
        let (tx, rx) = mpsc::channel(blueprint.batch.queue_capacity);
        let sink = SqlSink::new("sqlite", store.pool().clone());
        let processor = BatchProcessor::new(
            rx,
            sink,
            Arc::clone(&state),
            Duration::from_secs(blueprint.batch.flush_interval_secs),
            cancel.clone(),
        );
        let batch_metrics = processor.metrics();
        let processor_task = processor.spawn();

        info!(
            queue_capacity = blueprint.batch.queue_capacity,
            batch_size = blueprint.batch.size,
            flush_interval_secs = blueprint.batch.flush_interval_secs,
            "Batch processor started"
        );

        // Chat transport and reader
        info!(
            host = %blueprint.chat.host,
            port = blueprint.chat.port,
            "Connecting to chat server..."
        );
        let transport = match TcpTransport::connect(&blueprint.chat.host, blueprint.chat.port).await
        {
            Ok(transport) => transport,
            Err(e) => {
                cancel.cancel();
                let _ = processor_task.await;
                if let Ok(Err(serve_err)) = control_task.await {
                    warn!(error = %serve_err, "Control server error during shutdown");
                }
                return Err(e).with_context(|| {
                    format!(
                        "Failed to connect to chat server at {}:{}",
                        blueprint.chat.host, blueprint.chat.port
                    )
                });
            }
        };

        let reader = IrcReader::new(transport, ChatLogin::from(&blueprint.chat), tx, cancel.clone());
        let ingest_metrics = reader.metrics();

        info!(channel = %blueprint.chat.channel, "Reading chat stream");

        // The reader owns the queue sender. When it returns the channel
        // closes and the processor flushes whatever is buffered.
        let reader_result = reader.run().await;

        if let Err(ref e) = reader_result {
            warn!(error = %e, "Chat reader failed");
        }

        info!("Shutting down pipeline...");
        if tokio::time::timeout(Duration::from_secs(5), processor_task)
            .await
            .is_err()
        {
            warn!("Batch processor did not drain within 5s");
        }
        if let Ok(Err(serve_err)) = control_task.await {
            warn!(error = %serve_err, "Control server error during shutdown");
        }

        let ingest = ingest_metrics.snapshot();
        let batch = batch_metrics.snapshot();
        let stats = PipelineStats {
            lines_read: ingest.lines_read,
            events_ingested: ingest.events_forwarded,
            lines_discarded: ingest.lines_discarded,
            pings_answered: ingest.pings_answered,
            batches_flushed: batch.batches_flushed,
            events_flushed: batch.events_flushed,
            flush_failures: batch.flush_failures,
            duration: start_time.elapsed(),
        };

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            events_flushed = stats.events_flushed,
            "Pipeline shutdown complete"
        );

        // A failed stream is still an error even though the buffered
        // remainder was flushed
        reader_result.context("Chat stream failed")?;

        Ok(stats)
    }
}
