//! Connection state of a chat session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the single connection a chat session owns.
///
/// ```text
/// Disconnected ──connect()──▶ Connecting ──ok──▶ Open ──disconnect()/peer close──▶ Closed
///                                 │                 │
///                                 └──error──▶ Failed ◀──receive error──┘
/// ```
///
/// `Closed` and `Failed` may go back to `Connecting` through another
/// `connect()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closed,
    Failed,
}

impl ConnectionState {
    /// Whether `connect()` should dial a new connection from this state
    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Closed | Self::Failed)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether the session has finished with its last connection
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}
