//! Core chat domain models.

use serde::{Deserialize, Serialize};

use super::value_object::{EntryId, MessageText, ParticipantName, Timestamp};

/// Where a chat entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Typed by the current user and sent over the connection
    Local,
    /// Received from the connection
    Remote,
}

/// A single logged chat message.
///
/// Immutable once created: fields are private and only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    id: EntryId,
    text: MessageText,
    origin: Origin,
    author: ParticipantName,
    created_at: Timestamp,
}

impl ChatEntry {
    /// Create an entry for a message the current user sent
    pub fn local(author: ParticipantName, text: MessageText, created_at: Timestamp) -> Self {
        Self::new(Origin::Local, author, text, created_at)
    }

    /// Create an entry for a message received from the connection
    pub fn remote(author: ParticipantName, text: MessageText, created_at: Timestamp) -> Self {
        Self::new(Origin::Remote, author, text, created_at)
    }

    fn new(
        origin: Origin,
        author: ParticipantName,
        text: MessageText,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            text,
            origin,
            author,
            created_at,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn author(&self) -> &ParticipantName {
        &self.author
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Ordered, append-only sequence of chat entries.
///
/// Order is the order of `append` calls. There is no removal API.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<ChatEntry>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the log
    pub fn append(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    /// All entries in append order
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently appended entry
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }
}
