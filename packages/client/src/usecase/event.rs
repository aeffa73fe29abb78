//! Events a chat session publishes to its owner.

use crate::domain::{ChatEntry, ConnectionState};

use super::error::ChatError;

/// Published on the session's broadcast channel, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged(ConnectionState),
    /// Emitted under the same lock as the append, so event order matches log order
    EntryAppended(ChatEntry),
    /// Failures that happen in the background (connect, transmit, receive)
    Error(ChatError),
}
