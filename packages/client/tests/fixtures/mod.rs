//! Test fixtures: a local WebSocket server built with axum.
//!
//! Routes:
//! - `/echo`   sends every text frame back
//! - `/push`   sends "first" and "second" right after the upgrade
//! - `/hangup` sends "bye" and closes
//! - `/binary` sends a binary frame, then "text"
//!
//! Close codes received from clients are recorded.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};

#[derive(Clone, Default)]
struct FixtureState {
    close_codes: Arc<Mutex<Vec<u16>>>,
}

pub struct TestServer {
    addr: SocketAddr,
    state: FixtureState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind an ephemeral port and serve in the background
    pub async fn start() -> Self {
        let state = FixtureState::default();
        let app = Router::new()
            .route("/echo", get(echo_handler))
            .route("/push", get(push_handler))
            .route("/hangup", get(hangup_handler))
            .route("/binary", get(binary_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    /// Wait until a client close frame has been recorded
    pub async fn wait_for_close_code(&self) -> u16 {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if let Some(code) = self.state.close_codes.lock().await.first().copied() {
                    return code;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for close frame")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn echo_handler(
    ws: WebSocketUpgrade,
    State(state): State<FixtureState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| echo(socket, state))
}

async fn echo(mut socket: WebSocket, state: FixtureState) {
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            Message::Close(frame) => {
                if let Some(frame) = frame {
                    state.close_codes.lock().await.push(frame.code);
                }
                break;
            }
            _ => {}
        }
    }
}

async fn push_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket| async move {
        for text in ["first", "second"] {
            if socket
                .send(Message::Text(text.to_string().into()))
                .await
                .is_err()
            {
                return;
            }
        }
        // Keep the connection open until the client leaves.
        while let Some(Ok(msg)) = socket.recv().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    })
}

async fn hangup_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket| async move {
        let _ = socket.send(Message::Text("bye".to_string().into())).await;
        let _ = socket.send(Message::Close(None)).await;
        // Drain until the client acknowledges the close.
        while let Some(Ok(_)) = socket.recv().await {}
    })
}

async fn binary_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket| async move {
        let frames = [
            Message::Binary(vec![0xde, 0xad, 0xbe, 0xef].into()),
            Message::Text("text".to_string().into()),
        ];
        for frame in frames {
            if socket.send(frame).await.is_err() {
                return;
            }
        }
        while let Some(Ok(msg)) = socket.recv().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    })
}
