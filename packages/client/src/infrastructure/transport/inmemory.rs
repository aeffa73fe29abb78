//! In-memory connector.
//!
//! Each `connect` creates a channel pair and hands the far end to a
//! [`PeerListener`] as a [`RemotePeer`], which plays the server: it reads what
//! the session sent and pushes frames (or failures) back.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{Connection, Connector, FrameReceiver, FrameSender, TransportError};

/// What the peer observes from the session side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerFrame {
    Text(String),
    /// Normal-closure close frame
    Close,
}

/// Connector whose connections end in the same process.
pub struct InMemoryConnector {
    peers: mpsc::UnboundedSender<RemotePeer>,
    connects: AtomicUsize,
    connect_delay: Option<Duration>,
}

impl InMemoryConnector {
    /// Create a connector and the listener that receives its peers
    pub fn new() -> (Self, PeerListener) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connector = Self {
            peers: tx,
            connects: AtomicUsize::new(0),
            connect_delay: None,
        };
        (connector, PeerListener { peers: rx })
    }

    /// Make every `connect` take `delay` before it completes
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    /// Number of successful `connect` calls so far
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for InMemoryConnector {
    async fn connect(&self, endpoint: &str) -> Result<Connection, TransportError> {
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }

        let (to_client_tx, to_client_rx) = mpsc::unbounded_channel();
        let (to_peer_tx, to_peer_rx) = mpsc::unbounded_channel();
        let peer = RemotePeer {
            endpoint: endpoint.to_string(),
            to_client: Some(to_client_tx),
            from_client: to_peer_rx,
        };
        self.peers
            .send(peer)
            .map_err(|_| TransportError::ConnectFailed {
                endpoint: endpoint.to_string(),
                reason: "no listener".to_string(),
            })?;
        self.connects.fetch_add(1, Ordering::SeqCst);

        Ok(Connection::new(
            Box::new(InMemoryFrameSender {
                to_peer: to_peer_tx,
                closed: false,
            }),
            Box::new(InMemoryFrameReceiver { rx: to_client_rx }),
        ))
    }
}

/// Receives the far end of every connection the connector opens
pub struct PeerListener {
    peers: mpsc::UnboundedReceiver<RemotePeer>,
}

impl PeerListener {
    /// Wait for the next connection. `None` once the connector is dropped.
    pub async fn accept(&mut self) -> Option<RemotePeer> {
        self.peers.recv().await
    }
}

/// Server side of one in-memory connection
pub struct RemotePeer {
    endpoint: String,
    to_client: Option<mpsc::UnboundedSender<Result<String, TransportError>>>,
    from_client: mpsc::UnboundedReceiver<PeerFrame>,
}

impl RemotePeer {
    /// Endpoint the session dialed
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Push a text frame to the session. Returns false if the session side is gone.
    pub fn send_text(&self, text: impl Into<String>) -> bool {
        self.push(Ok(text.into()))
    }

    /// Make the session's pending receive fail with `error`
    pub fn fail(&self, error: TransportError) -> bool {
        self.push(Err(error))
    }

    /// Close from the peer side; the session sees end of stream
    pub fn close(&mut self) {
        self.to_client = None;
    }

    /// Stop accepting frames; later sends from the session fail
    pub fn stop_reading(&mut self) {
        self.from_client.close();
    }

    /// Next frame the session sent
    pub async fn recv(&mut self) -> Option<PeerFrame> {
        self.from_client.recv().await
    }

    fn push(&self, item: Result<String, TransportError>) -> bool {
        self.to_client
            .as_ref()
            .is_some_and(|tx| tx.send(item).is_ok())
    }
}

struct InMemoryFrameSender {
    to_peer: mpsc::UnboundedSender<PeerFrame>,
    closed: bool,
}

#[async_trait]
impl FrameSender for InMemoryFrameSender {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.to_peer
            .send(PeerFrame::Text(text))
            .map_err(|_| TransportError::WriteFailed("peer is not reading".to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if !self.closed {
            self.closed = true;
            let _ = self.to_peer.send(PeerFrame::Close);
        }
        Ok(())
    }
}

struct InMemoryFrameReceiver {
    rx: mpsc::UnboundedReceiver<Result<String, TransportError>>,
}

#[async_trait]
impl FrameReceiver for InMemoryFrameReceiver {
    async fn next_text(&mut self) -> Option<Result<String, TransportError>> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frames_flow_both_ways() {
        // テスト項目: セッション側とピア側でフレームを送受信できる
        // given (前提条件):
        let (connector, mut listener) = InMemoryConnector::new();
        let mut connection = connector.connect("ws://test/chat").await.unwrap();
        let mut peer = listener.accept().await.unwrap();

        // when (操作):
        connection.sender.send_text("hi".to_string()).await.unwrap();
        assert!(peer.send_text("hello back"));

        // then (期待する結果):
        assert_eq!(peer.endpoint(), "ws://test/chat");
        assert_eq!(peer.recv().await, Some(PeerFrame::Text("hi".to_string())));
        assert_eq!(
            connection.receiver.next_text().await,
            Some(Ok("hello back".to_string()))
        );
        assert_eq!(connector.connect_count(), 1);
    }

    #[tokio::test]
    async fn test_close_is_observed_once() {
        // テスト項目: close は一度だけピアに通知され、以降の送信はエラー
        let (connector, mut listener) = InMemoryConnector::new();
        let mut connection = connector.connect("ws://test/chat").await.unwrap();
        let mut peer = listener.accept().await.unwrap();

        connection.sender.close().await.unwrap();
        connection.sender.close().await.unwrap();

        assert_eq!(peer.recv().await, Some(PeerFrame::Close));
        assert_eq!(
            connection.sender.send_text("late".to_string()).await,
            Err(TransportError::Closed)
        );
    }

    #[tokio::test]
    async fn test_peer_close_ends_stream() {
        // テスト項目: ピアが close すると受信は None で終わる
        let (connector, mut listener) = InMemoryConnector::new();
        let mut connection = connector.connect("ws://test/chat").await.unwrap();
        let mut peer = listener.accept().await.unwrap();

        peer.close();

        assert_eq!(connection.receiver.next_text().await, None);
        assert!(!peer.send_text("after close"));
    }

    #[tokio::test]
    async fn test_connect_without_listener_fails() {
        // テスト項目: listener が破棄されていると接続は失敗する
        let (connector, listener) = InMemoryConnector::new();
        drop(listener);

        let result = connector.connect("ws://test/chat").await;

        assert!(matches!(
            result,
            Err(TransportError::ConnectFailed { .. })
        ));
        assert_eq!(connector.connect_count(), 0);
    }
}
