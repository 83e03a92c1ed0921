//! TCP transport for the chat protocol

use contracts::{ChatTransport, ContractError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, instrument};

/// Line-oriented transport over a TCP connection
pub struct TcpTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TcpTransport {
    /// Connect to the chat server
    ///
    /// # Errors
    /// Returns a connection error when the dial fails.
    #[instrument(name = "tcp_transport_connect")]
    pub async fn connect(host: &str, port: u16) -> Result<Self, ContractError> {
        let stream = TcpStream::connect((host, port)).await.map_err(|e| {
            ContractError::chat_connection(format!("failed to dial {host}:{port}: {e}"))
        })?;
        debug!(host, port, "Connected to chat server");

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }
}

impl ChatTransport for TcpTransport {
    async fn read_line(&mut self) -> Result<Option<String>, ContractError> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| ContractError::chat_stream(format!("read failed: {e}")))?;

        if n == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    async fn write_line(&mut self, line: &str) -> Result<(), ContractError> {
        self.writer
            .write_all(format!("{line}\r\n").as_bytes())
            .await
            .map_err(|e| ContractError::chat_stream(format!("write failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn tcp_transport_reads_and_writes_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"PING :tmi.twitch.tv\r\n").await.unwrap();

            let mut buf = vec![0u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });

        let mut transport = TcpTransport::connect("127.0.0.1", addr.port()).await.unwrap();
        let line = transport.read_line().await.unwrap();
        assert_eq!(line.as_deref(), Some("PING :tmi.twitch.tv"));

        transport.write_line("PONG :tmi.twitch.tv").await.unwrap();
        let received = server.await.unwrap();
        assert_eq!(received, "PONG :tmi.twitch.tv\r\n");
    }

    #[tokio::test]
    async fn connect_to_closed_port_fails() {
        // Bind and immediately drop to get a (very likely) closed port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = TcpTransport::connect("127.0.0.1", addr.port()).await;
        assert!(matches!(
            result,
            Err(ContractError::ChatConnection { .. })
        ));
    }
}
