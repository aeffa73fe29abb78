//! Domain layer for the clinic chat client.
//!
//! This module contains the chat model (entries, log, connection state), the
//! appointment model, and the traits the infrastructure layer implements.
//! Nothing here depends on a concrete transport or data source.

pub mod appointment;
pub mod connector;
pub mod entity;
pub mod error;
pub mod repository;
pub mod state;
pub mod value_object;

pub use appointment::Appointment;
pub use connector::{Connection, Connector, FrameReceiver, FrameSender};
pub use entity::{ChatEntry, MessageLog, Origin};
pub use error::{AppointmentError, TransportError, ValueObjectError};
pub use repository::AppointmentRepository;
pub use state::ConnectionState;
pub use value_object::{AppointmentId, EntryId, MessageText, ParticipantName, Timestamp};
