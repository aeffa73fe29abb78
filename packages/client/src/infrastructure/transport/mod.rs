//! Connector implementations.

#[cfg(test)]
pub mod inmemory;
pub mod websocket;

#[cfg(test)]
pub use inmemory::{InMemoryConnector, PeerFrame, PeerListener, RemotePeer};
pub use websocket::WebSocketConnector;
