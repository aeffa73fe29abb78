//! WebSocket connector built on `tokio-tungstenite`.
//!
//! Frames are raw UTF-8 text, one chat message per frame. Ping/pong is
//! answered by tungstenite itself; binary frames are skipped.

use async_trait::async_trait;
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        Error as WsError, Message,
        protocol::{CloseFrame, frame::coding::CloseCode},
    },
};
use url::Url;

use crate::domain::{Connection, Connector, FrameReceiver, FrameSender, TransportError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Dials `ws://` (or `wss://`) endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

impl WebSocketConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, endpoint: &str) -> Result<Connection, TransportError> {
        let url = parse_endpoint(endpoint)?;

        let (stream, response) =
            connect_async(url.as_str())
                .await
                .map_err(|e| TransportError::ConnectFailed {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;
        tracing::debug!(
            "WebSocket handshake with '{}' completed ({})",
            endpoint,
            response.status()
        );

        let (sink, stream) = stream.split();
        Ok(Connection::new(
            Box::new(WebSocketFrameSender { sink }),
            Box::new(WebSocketFrameReceiver { stream }),
        ))
    }
}

/// Validate the endpoint before dialing.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "ws" | "wss" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

struct WebSocketFrameSender {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameSender for WebSocketFrameSender {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| match e {
                WsError::ConnectionClosed | WsError::AlreadyClosed => TransportError::Closed,
                other => TransportError::WriteFailed(other.to_string()),
            })
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        };
        match self.sink.send(Message::Close(Some(frame))).await {
            Ok(()) => Ok(()),
            // Peer got there first.
            Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(TransportError::WriteFailed(e.to_string())),
        }
    }
}

struct WebSocketFrameReceiver {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl FrameReceiver for WebSocketFrameReceiver {
    async fn next_text(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            let msg = match self.stream.next().await? {
                Ok(msg) => msg,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return None,
                Err(e) => return Some(Err(TransportError::ReadFailed(e.to_string()))),
            };

            match msg {
                Message::Text(text) => return Some(Ok(text.as_str().to_owned())),
                Message::Binary(data) => {
                    tracing::warn!("Skipping binary frame ({} bytes)", data.len());
                }
                Message::Close(frame) => {
                    tracing::debug!("Peer sent close frame: {:?}", frame);
                    return None;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
    }
}
