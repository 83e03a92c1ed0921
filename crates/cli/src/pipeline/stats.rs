//! Pipeline statistics.

use std::time::Duration;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Raw protocol lines read from the chat stream
    pub lines_read: u64,

    /// Message events forwarded into the queue
    pub events_ingested: u64,

    /// Non-message lines discarded by the parser
    pub lines_discarded: u64,

    /// Liveness PINGs answered in-band
    pub pings_answered: u64,

    /// Batches committed to the store
    pub batches_flushed: u64,

    /// Events committed across all batches
    pub events_flushed: u64,

    /// Batches that failed to commit and were dropped
    pub flush_failures: u64,

    /// Total duration of the pipeline run
    pub duration: Duration,
}

impl PipelineStats {
    /// Events committed per second over the run
    pub fn events_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.events_flushed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Pipeline Statistics ===\n");
        println!("Ingestion:");
        println!("  Lines read: {}", self.lines_read);
        println!("  Events forwarded: {}", self.events_ingested);
        println!("  Lines discarded: {}", self.lines_discarded);
        println!("  PINGs answered: {}", self.pings_answered);
        println!("\nPersistence:");
        println!("  Batches flushed: {}", self.batches_flushed);
        println!("  Events flushed: {}", self.events_flushed);
        println!("  Flush failures: {}", self.flush_failures);
        println!("\nRun:");
        println!("  Duration: {:.2}s", self.duration.as_secs_f64());
        println!("  Throughput: {:.2} events/s", self.events_per_sec());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_per_sec_handles_zero_duration() {
        let stats = PipelineStats::default();
        assert_eq!(stats.events_per_sec(), 0.0);
    }

    #[test]
    fn events_per_sec_divides_by_duration() {
        let stats = PipelineStats {
            events_flushed: 100,
            duration: Duration::from_secs(10),
            ..Default::default()
        };
        assert!((stats.events_per_sec() - 10.0).abs() < f64::EPSILON);
    }
}
