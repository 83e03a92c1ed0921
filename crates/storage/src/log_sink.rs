//! LogSink - logs batch summaries via tracing

use contracts::{ChatEvent, ContractError, EventSink};
use tracing::{info, instrument};

/// Sink that logs batch summaries instead of persisting them
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl EventSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write_batch",
        skip(self, batch),
        fields(sink = %self.name, batch_len = batch.len())
    )]
    async fn write_batch(&mut self, batch: &[ChatEvent]) -> Result<(), ContractError> {
        let first_origin = batch.first().map(|e| e.origin.as_str()).unwrap_or("-");
        info!(
            sink = %self.name,
            batch_len = batch.len(),
            first_origin,
            "Batch received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_write() {
        let mut sink = LogSink::new("test_log");
        let batch = vec![ChatEvent::now("alice", "hi")];
        assert!(sink.write_batch(&batch).await.is_ok());
    }

    #[tokio::test]
    async fn test_log_sink_name() {
        let sink = LogSink::new("my_logger");
        assert_eq!(sink.name(), "my_logger");
    }
}
