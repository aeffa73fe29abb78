//! Clinic chat client library.
//!
//! A chat session owns one WebSocket connection, sends text frames typed by
//! the current user and receives frames from the remote user, appending both
//! to an ordered message log. The appointment catalog the chat sheet is opened
//! from lives alongside it.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod usecase;

pub use config::ChatConfig;
pub use domain::{ChatEntry, ConnectionState, MessageLog, Origin};
pub use usecase::{ChatError, ChatSession, SessionEvent};
