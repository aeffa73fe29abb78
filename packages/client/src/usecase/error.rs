//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionState, TransportError, ValueObjectError};

/// Errors surfaced by a chat session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The endpoint is malformed or unreachable
    #[error("connection error: {0}")]
    Connection(TransportError),

    /// A frame could not be transmitted on an open connection
    #[error("send error: {0}")]
    Send(TransportError),

    /// The connection failed while waiting for a frame
    #[error("receive error: {0}")]
    Receive(TransportError),

    /// `send` was called while the session is not open
    #[error("session is not open (state: {0})")]
    NotOpen(ConnectionState),

    /// The message text failed validation
    #[error("invalid message: {0}")]
    InvalidMessage(ValueObjectError),

    /// A participant name in the configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(ValueObjectError),

    /// `disconnect` was called while `connect` was still dialing
    #[error("connect aborted by disconnect")]
    ConnectAborted,
}
