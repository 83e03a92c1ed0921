//! ChatTransport trait - chat protocol stream abstraction
//!
//! Decouples the protocol reader from the concrete byte stream so the
//! reader can be driven by a real TCP connection or a scripted transport
//! in tests.

use crate::ContractError;

/// Line-oriented chat stream
///
/// One implementation wraps a TCP connection to the chat server; tests use
/// a scripted implementation that replays canned protocol lines.
///
/// `read_line` returns the next line without its trailing terminator, or
/// `None` when the stream has ended.
#[trait_variant::make(ChatTransport: Send)]
pub trait LocalChatTransport {
    /// Read the next protocol line, `None` on end of stream
    ///
    /// # Errors
    /// Returns a transport error when the underlying stream fails. Transport
    /// errors are fatal to the reader loop.
    async fn read_line(&mut self) -> Result<Option<String>, ContractError>;

    /// Write one protocol line (terminator appended by the implementation)
    async fn write_line(&mut self, line: &str) -> Result<(), ContractError>;
}
