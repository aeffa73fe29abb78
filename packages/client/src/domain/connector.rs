//! Connection seam between the chat session and a concrete transport.
//!
//! The session only ever sees these traits. The WebSocket implementation lives
//! in `infrastructure::transport`; tests plug in an in-memory one.

use async_trait::async_trait;

use super::error::TransportError;

/// Writing half of an open connection.
#[async_trait]
pub trait FrameSender: Send {
    /// Transmit one text frame.
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Close the connection with the normal-closure code.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Reading half of an open connection.
#[async_trait]
pub trait FrameReceiver: Send {
    /// Await the next inbound text frame.
    ///
    /// `None` means the peer closed the connection. Must be cancel safe: the
    /// session drops the pending future on shutdown.
    async fn next_text(&mut self) -> Option<Result<String, TransportError>>;
}

/// An open connection split into its two halves.
pub struct Connection {
    pub sender: Box<dyn FrameSender>,
    pub receiver: Box<dyn FrameReceiver>,
}

impl Connection {
    pub fn new(sender: Box<dyn FrameSender>, receiver: Box<dyn FrameReceiver>) -> Self {
        Self { sender, receiver }
    }
}

/// Dials an endpoint and yields an open connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<Connection, TransportError>;
}
