//! UseCase: チャットセッション
//!
//! 1 つのエンドポイントへの接続を保持し、送信（Local エントリ）と受信ループ
//! （Remote エントリ）の結果をメッセージログに追加します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChatSession の connect / send / disconnect と受信ループ
//!
//! ### なぜこのテストが必要か
//! - 送信は楽観的にログへ追加され、送信結果を待たないことを保証
//! - 受信ループは 1 本だけで、フレームごとに再度待ち受けることを確認
//! - 切断後はフレームが届いてもログに追加されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信・受信・切断のシナリオ
//! - 異常系：接続失敗、受信エラー、送信失敗、Open 以外での送信
//! - エッジケース：connect の二重呼び出し、接続中の disconnect、再接続

use std::sync::Arc;

use tokio::{
    sync::{Mutex, broadcast, mpsc, watch},
    task::JoinHandle,
};

use crate::{
    config::ChatConfig,
    domain::{
        ChatEntry, Connection, ConnectionState, Connector, FrameReceiver, FrameSender, MessageLog,
        MessageText, ParticipantName, Timestamp, TransportError,
    },
    infrastructure::transport::WebSocketConnector,
};

use super::{error::ChatError, event::SessionEvent};

/// A chat session: one connection, one message log.
///
/// All methods take `&self`; share the session with `Arc` to call `send` and
/// `disconnect` from different tasks.
pub struct ChatSession {
    endpoint: String,
    local: ParticipantName,
    remote: ParticipantName,
    connector: Arc<dyn Connector>,
    shared: Arc<Shared>,
}

/// State shared with the receive and write tasks
struct Shared {
    inner: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    /// Tasks of generation `g` stop once this reaches `g`; kept outside
    /// `inner` so `Drop` never has to take the lock
    stop: watch::Sender<u64>,
}

struct SessionState {
    state: ConnectionState,
    log: MessageLog,
    /// Bumped on every dial; tasks of an older connection never touch the log
    generation: u64,
    link: Option<Link>,
}

/// Handles to the tasks serving the current connection
struct Link {
    outbound: mpsc::UnboundedSender<String>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Shared {
    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Detach the link and tell its tasks to stop
    fn stop_link(&self, st: &mut SessionState) -> Option<Link> {
        let link = st.link.take()?;
        self.stop.send_replace(st.generation);
        Some(link)
    }

    fn transition(&self, st: &mut SessionState, next: ConnectionState) {
        if st.state == next {
            return;
        }
        tracing::info!("Chat session {} -> {}", st.state, next);
        st.state = next;
        self.publish(SessionEvent::StateChanged(next));
    }
}

impl SessionState {
    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.state.is_open()
    }
}

impl ChatSession {
    /// Create a session that dials through `connector`.
    ///
    /// # Errors
    ///
    /// `ChatError::InvalidConfig` if a participant name is empty or too long
    pub fn new(config: ChatConfig, connector: Arc<dyn Connector>) -> Result<Self, ChatError> {
        let local =
            ParticipantName::new(config.local_participant).map_err(ChatError::InvalidConfig)?;
        let remote =
            ParticipantName::new(config.remote_participant).map_err(ChatError::InvalidConfig)?;
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let (stop, _) = watch::channel(0);

        Ok(Self {
            endpoint: config.endpoint,
            local,
            remote,
            connector,
            shared: Arc::new(Shared {
                inner: Mutex::new(SessionState {
                    state: ConnectionState::Disconnected,
                    log: MessageLog::new(),
                    generation: 0,
                    link: None,
                }),
                events,
                stop,
            }),
        })
    }

    /// Create a session that speaks WebSocket
    pub fn websocket(config: ChatConfig) -> Result<Self, ChatError> {
        Self::new(config, Arc::new(WebSocketConnector::new()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn local_participant(&self) -> &ParticipantName {
        &self.local
    }

    pub fn remote_participant(&self) -> &ParticipantName {
        &self.remote
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    pub async fn state(&self) -> ConnectionState {
        self.shared.inner.lock().await.state
    }

    /// Snapshot of the message log in append order
    pub async fn entries(&self) -> Vec<ChatEntry> {
        self.shared.inner.lock().await.log.entries().to_vec()
    }

    /// Open the connection and arm the receive loop.
    ///
    /// No-op while `Connecting` or `Open`. From `Disconnected`, `Closed` or
    /// `Failed` a new connection is dialed; the message log is kept.
    ///
    /// # Errors
    ///
    /// * `ChatError::Connection` - the endpoint is malformed or unreachable (state becomes `Failed`)
    /// * `ChatError::ConnectAborted` - `disconnect` was called while dialing
    pub async fn connect(&self) -> Result<(), ChatError> {
        let generation = {
            let mut st = self.shared.inner.lock().await;
            if !st.state.can_connect() {
                tracing::debug!("connect() ignored: session is already {}", st.state);
                return Ok(());
            }
            st.generation += 1;
            self.shared.transition(&mut st, ConnectionState::Connecting);
            st.generation
        };

        tracing::info!("Connecting to '{}'", self.endpoint);
        let result = self.connector.connect(&self.endpoint).await;

        let mut st = self.shared.inner.lock().await;
        let still_wanted =
            st.generation == generation && st.state == ConnectionState::Connecting;

        let connection = match result {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!("Failed to connect to '{}': {}", self.endpoint, e);
                let err = ChatError::Connection(e);
                if still_wanted {
                    self.shared.transition(&mut st, ConnectionState::Failed);
                }
                self.shared.publish(SessionEvent::Error(err.clone()));
                return Err(err);
            }
        };

        if !still_wanted {
            drop(st);
            tracing::warn!(
                "Connection to '{}' opened after disconnect, closing it",
                self.endpoint
            );
            let Connection { mut sender, .. } = connection;
            if let Err(e) = sender.close().await {
                tracing::debug!("Failed to close aborted connection: {}", e);
            }
            return Err(ChatError::ConnectAborted);
        }

        // The lock is held until the state is Open, so the receive loop
        // cannot observe Connecting.
        st.link = Some(spawn_link(
            self.shared.clone(),
            generation,
            connection,
            self.remote.clone(),
        ));
        self.shared.transition(&mut st, ConnectionState::Open);
        Ok(())
    }

    /// Append a Local entry and queue `text` for transmission.
    ///
    /// The entry is in the log when this returns; the frame is written by a
    /// background task. A failed write is published as
    /// `SessionEvent::Error(ChatError::Send(..))` and the entry stays.
    ///
    /// # Errors
    ///
    /// * `ChatError::InvalidMessage` - `text` is empty or too long
    /// * `ChatError::NotOpen` - the session is not `Open`; nothing is appended
    pub async fn send(&self, text: impl Into<String>) -> Result<ChatEntry, ChatError> {
        let text = MessageText::new(text.into()).map_err(ChatError::InvalidMessage)?;

        let mut st = self.shared.inner.lock().await;
        let outbound = match (&st.link, st.state) {
            (Some(link), ConnectionState::Open) => link.outbound.clone(),
            (_, state) => {
                tracing::warn!("Rejecting send: session is {}", state);
                return Err(ChatError::NotOpen(state));
            }
        };

        let entry = ChatEntry::local(self.local.clone(), text.clone(), Timestamp::now());
        st.log.append(entry.clone());
        self.shared.publish(SessionEvent::EntryAppended(entry.clone()));

        if outbound.send(text.into_string()).is_err() {
            tracing::error!("Failed to queue frame: writer has stopped");
            self.shared
                .publish(SessionEvent::Error(ChatError::Send(TransportError::Closed)));
        }
        Ok(entry)
    }

    /// Close the connection with the normal-closure code.
    ///
    /// Safe at any time and idempotent. Once this returns, the receive loop
    /// has stopped and nothing more is appended to the log.
    pub async fn disconnect(&self) {
        let link = {
            let mut st = self.shared.inner.lock().await;
            match st.state {
                ConnectionState::Connecting | ConnectionState::Open => {
                    self.shared.transition(&mut st, ConnectionState::Closed);
                    self.shared.stop_link(&mut st)
                }
                state => {
                    tracing::debug!("disconnect() ignored: session is {}", state);
                    return;
                }
            }
        };

        if let Some(Link { reader, writer, .. }) = link {
            for handle in [reader, writer] {
                if let Err(e) = handle.await {
                    tracing::warn!("Session task ended abnormally: {}", e);
                }
            }
        }
        tracing::info!("Disconnected from '{}'", self.endpoint);
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        // Every task of this session stops, whatever generation it serves.
        self.shared.stop.send_replace(u64::MAX);
        tracing::debug!("Chat session dropped");
    }
}

fn spawn_link(
    shared: Arc<Shared>,
    generation: u64,
    connection: Connection,
    remote: ParticipantName,
) -> Link {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let stop = shared.stop.subscribe();
    let Connection { sender, receiver } = connection;

    let reader = tokio::spawn(receive_loop(
        shared.clone(),
        generation,
        receiver,
        stop.clone(),
        remote,
    ));
    let writer = tokio::spawn(write_loop(shared, generation, sender, outbound_rx, stop));

    Link {
        outbound: outbound_tx,
        reader,
        writer,
    }
}

/// Await one frame at a time and append it as a Remote entry.
async fn receive_loop(
    shared: Arc<Shared>,
    generation: u64,
    mut receiver: Box<dyn FrameReceiver>,
    mut stop: watch::Receiver<u64>,
    remote: ParticipantName,
) {
    loop {
        let frame = tokio::select! {
            biased;
            _ = stopped(&mut stop, generation) => break,
            frame = receiver.next_text() => frame,
        };

        match frame {
            Some(Ok(text)) => {
                let text = match MessageText::from_inbound(text) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!("Skipping inbound frame: {}", e);
                        continue;
                    }
                };

                let mut st = shared.inner.lock().await;
                if !st.is_current(generation) {
                    tracing::debug!("Dropping frame received after close");
                    break;
                }
                tracing::debug!("Received frame from '{}'", remote);
                let entry = ChatEntry::remote(remote.clone(), text, Timestamp::now());
                st.log.append(entry.clone());
                shared.publish(SessionEvent::EntryAppended(entry));
            }
            Some(Err(e)) => {
                tracing::error!("Receive failed: {}", e);
                let mut st = shared.inner.lock().await;
                if st.is_current(generation) {
                    shared.transition(&mut st, ConnectionState::Failed);
                    shared.publish(SessionEvent::Error(ChatError::Receive(e)));
                    shared.stop_link(&mut st);
                }
                break;
            }
            None => {
                let mut st = shared.inner.lock().await;
                if st.is_current(generation) {
                    tracing::info!("Peer closed the connection");
                    shared.transition(&mut st, ConnectionState::Closed);
                    shared.stop_link(&mut st);
                }
                break;
            }
        }
    }
    tracing::debug!("Receive loop finished");
}

/// Write queued frames until shutdown, then close the connection.
async fn write_loop(
    shared: Arc<Shared>,
    generation: u64,
    mut sender: Box<dyn FrameSender>,
    mut outbound: mpsc::UnboundedReceiver<String>,
    mut stop: watch::Receiver<u64>,
) {
    loop {
        tokio::select! {
            biased;
            _ = stopped(&mut stop, generation) => break,
            text = outbound.recv() => match text {
                Some(text) => transmit(&shared, sender.as_mut(), text).await,
                None => break,
            },
        }
    }

    // Frames queued before the shutdown still go out.
    while let Ok(text) = outbound.try_recv() {
        transmit(&shared, sender.as_mut(), text).await;
    }
    if let Err(e) = sender.close().await {
        tracing::debug!("Failed to close connection: {}", e);
    }
    tracing::debug!("Write loop finished");
}

/// Resolve once the stop mark covers `generation`
async fn stopped(stop: &mut watch::Receiver<u64>, generation: u64) {
    loop {
        if *stop.borrow_and_update() >= generation {
            return;
        }
        if stop.changed().await.is_err() {
            return;
        }
    }
}

async fn transmit(shared: &Shared, sender: &mut dyn FrameSender, text: String) {
    match sender.send_text(text).await {
        Ok(()) => tracing::debug!("Sent frame"),
        Err(e) => {
            tracing::error!("Failed to send frame: {}", e);
            shared.publish(SessionEvent::Error(ChatError::Send(e)));
        }
    }
}
