//! # Ingestion
//!
//! Chat protocol reader: logs into the chat server, consumes the line
//! stream, answers liveness PINGs in-band, parses PRIVMSG lines into
//! [`contracts::ChatEvent`]s and pushes them into the bounded queue.
//!
//! The reader is generic over [`contracts::ChatTransport`], so tests drive
//! it with a [`ScriptedTransport`] while production wires a [`TcpTransport`].

mod metrics;
mod mock;
mod parse;
mod reader;
mod tcp;

pub use metrics::{IngestMetrics, IngestSnapshot};
pub use mock::ScriptedTransport;
pub use parse::{parse_line, ParsedLine};
pub use reader::{ChatLogin, IrcReader};
pub use tcp::TcpTransport;
