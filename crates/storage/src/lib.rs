//! # Storage
//!
//! SQLite persistence for chat batches: connection pooling, idempotent
//! schema provisioning, and the transactional [`SqlSink`]. A tracing-only
//! [`LogSink`] is provided for tests and dry wiring.
//!
//! The pool is used exclusively by the batcher's sink task; it is never
//! shared with another writer.

mod log_sink;
mod sink;
mod store;

pub use log_sink::LogSink;
pub use sink::SqlSink;
pub use store::ChatStore;
