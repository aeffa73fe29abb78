//! Infrastructure layer
//!
//! Concrete implementations of the traits defined in the domain layer:
//! WebSocket and in-memory connectors, and the bundled appointment catalog.

pub mod dto;
pub mod repository;
pub mod transport;
