//! IrcReader - the protocol read loop
//!
//! One dedicated task: login, then read lines until the stream ends, the
//! transport fails, or the pipeline is cancelled. A transport failure is
//! fatal to the reader; the reader trips the shared cancellation token on
//! exit so the rest of the pipeline shuts down instead of idling forever.

use std::sync::Arc;

use contracts::{ChatConfig, ChatEvent, ChatTransport, ContractError};
use metrics::counter;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace};

use crate::metrics::IngestMetrics;
use crate::parse::{parse_line, ParsedLine, PONG_REPLY};

/// Login parameters for the chat server
#[derive(Debug, Clone)]
pub struct ChatLogin {
    /// Nickname sent as NICK
    pub nickname: String,

    /// Token sent as PASS, skipped when absent
    pub token: Option<String>,

    /// Channel joined after login, without the leading '#'
    pub channel: String,
}

impl From<&ChatConfig> for ChatLogin {
    fn from(config: &ChatConfig) -> Self {
        Self {
            nickname: config.nickname.clone(),
            token: config.token.clone(),
            channel: config.channel.clone(),
        }
    }
}

/// Chat protocol reader
///
/// Generic over the transport so tests can drive it with scripted lines.
pub struct IrcReader<T: ChatTransport> {
    transport: T,
    login: ChatLogin,
    tx: mpsc::Sender<ChatEvent>,
    metrics: Arc<IngestMetrics>,
    cancel: CancellationToken,
}

impl<T: ChatTransport> IrcReader<T> {
    /// Create a reader over an established transport
    pub fn new(
        transport: T,
        login: ChatLogin,
        tx: mpsc::Sender<ChatEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            transport,
            login,
            tx,
            metrics: Arc::new(IngestMetrics::new()),
            cancel,
        }
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> Arc<IngestMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the reader to completion
    ///
    /// Returns when the stream ends, the pipeline is cancelled, or the
    /// transport fails. Always cancels the shared token on exit.
    #[instrument(name = "irc_reader_run", skip(self), fields(channel = %self.login.channel))]
    pub async fn run(mut self) -> Result<(), ContractError> {
        let result = async {
            self.send_login().await?;
            self.read_loop().await
        }
        .await;

        // Fail-fast: whatever ends the reader ends the pipeline
        self.cancel.cancel();
        result
    }

    async fn send_login(&mut self) -> Result<(), ContractError> {
        if let Some(token) = self.login.token.clone() {
            self.transport.write_line(&format!("PASS {token}")).await?;
        }
        let nickname = self.login.nickname.clone();
        let channel = self.login.channel.clone();
        self.transport.write_line(&format!("NICK {nickname}")).await?;
        self.transport.write_line(&format!("JOIN #{channel}")).await?;

        info!(nickname = %self.login.nickname, channel = %self.login.channel, "Logged into chat server");
        Ok(())
    }

    async fn read_loop(&mut self) -> Result<(), ContractError> {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    debug!("Reader cancelled");
                    return Ok(());
                }
                line = self.transport.read_line() => match line? {
                    Some(raw) => self.handle_line(raw.trim()).await?,
                    None => {
                        info!("Chat stream ended");
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<(), ContractError> {
        self.metrics.record_line();

        match parse_line(line) {
            ParsedLine::Ping => {
                self.transport.write_line(PONG_REPLY).await?;
                self.metrics.record_ping();
                trace!("Answered PING");
            }
            ParsedLine::Privmsg { origin, text } => {
                let event = ChatEvent::now(origin, text);
                // Blocks when the queue is full - backpressure on the stream
                if self.tx.send(event).await.is_err() {
                    return Err(ContractError::chat_stream("event queue closed"));
                }
                self.metrics.record_forwarded();
                counter!("chat_loader_events_ingested_total").increment(1);
            }
            ParsedLine::Other => {
                self.metrics.record_discarded();
            }
        }
        Ok(())
    }
}
