//! Pipeline metric recording helpers
//!
//! All metric names carry the `chat_loader_` prefix.

use metrics::{counter, gauge, histogram};

/// Record a committed batch
pub fn record_batch_flushed(batch_len: usize, trigger: &'static str) {
    counter!("chat_loader_batches_flushed_total", "trigger" => trigger).increment(1);
    counter!("chat_loader_events_flushed_total").increment(batch_len as u64);
    histogram!("chat_loader_batch_size").record(batch_len as f64);
    gauge!("chat_loader_last_batch_size").set(batch_len as f64);
}

/// Record a batch dropped because the sink failed
pub fn record_flush_failure() {
    counter!("chat_loader_flush_failures_total").increment(1);
}

/// Record individual insert failures inside a committed batch
pub fn record_record_insert_failures(count: u64) {
    if count > 0 {
        counter!("chat_loader_record_insert_failures_total").increment(count);
    }
}
