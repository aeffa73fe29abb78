//! Chat session configuration.

/// Endpoint the chat sheet connects to
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8080/chat";

/// Display name of the person using the app
pub const DEFAULT_LOCAL_PARTICIPANT: &str = "Current User";

/// Display name of the person at the other end of the chat
pub const DEFAULT_REMOTE_PARTICIPANT: &str = "Remote User";

/// Buffered session events per subscriber before lagging ones drop events
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Settings for one [`ChatSession`](crate::usecase::ChatSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub endpoint: String,
    pub local_participant: String,
    pub remote_participant: String,
    pub event_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            local_participant: DEFAULT_LOCAL_PARTICIPANT.to_string(),
            remote_participant: DEFAULT_REMOTE_PARTICIPANT.to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ChatConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_local_participant(mut self, name: impl Into<String>) -> Self {
        self.local_participant = name.into();
        self
    }

    pub fn with_remote_participant(mut self, name: impl Into<String>) -> Self {
        self.remote_participant = name.into();
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}
