//! Scripted transport for tests
//!
//! Replays canned protocol lines and records everything the reader writes,
//! so reader behavior can be verified without a chat server.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use contracts::{ChatTransport, ContractError};

/// Transport that replays a fixed script of lines
pub struct ScriptedTransport {
    lines: VecDeque<String>,
    sent: Arc<Mutex<Vec<String>>>,
    fail_at_end: bool,
}

impl ScriptedTransport {
    /// Create a transport that yields `lines` and then signals end of stream
    pub fn new(lines: Vec<&str>) -> Self {
        Self {
            lines: lines.into_iter().map(String::from).collect(),
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_at_end: false,
        }
    }

    /// Create a transport that yields `lines` and then fails the read,
    /// simulating a dropped connection
    pub fn failing_after(lines: Vec<&str>) -> Self {
        Self {
            fail_at_end: true,
            ..Self::new(lines)
        }
    }

    /// Handle to the lines written by the reader (login, PONGs)
    pub fn sent(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }
}

impl ChatTransport for ScriptedTransport {
    async fn read_line(&mut self) -> Result<Option<String>, ContractError> {
        match self.lines.pop_front() {
            Some(line) => Ok(Some(line)),
            None if self.fail_at_end => {
                Err(ContractError::chat_stream("scripted connection reset"))
            }
            None => Ok(None),
        }
    }

    async fn write_line(&mut self, line: &str) -> Result<(), ContractError> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_transport_replays_then_ends() {
        let mut transport = ScriptedTransport::new(vec!["one", "two"]);
        assert_eq!(transport.read_line().await.unwrap(), Some("one".into()));
        assert_eq!(transport.read_line().await.unwrap(), Some("two".into()));
        assert_eq!(transport.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_transport_errors_after_script() {
        let mut transport = ScriptedTransport::failing_after(vec!["one"]);
        assert!(transport.read_line().await.unwrap().is_some());
        assert!(transport.read_line().await.is_err());
    }
}
