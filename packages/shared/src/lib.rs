//! Shared utilities for Clinic Chat.
//!
//! Logger setup and JST timestamp helpers used by the client library and its
//! binaries.

pub mod logger;
pub mod time;
