//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// ParticipantName validation error
    #[error("ParticipantName cannot be empty")]
    ParticipantNameEmpty,

    /// ParticipantName too long error
    #[error("ParticipantName cannot exceed {max} characters (got {actual})")]
    ParticipantNameTooLong { max: usize, actual: usize },

    /// AppointmentId validation error
    #[error("AppointmentId cannot be empty")]
    AppointmentIdEmpty,
}

/// Errors raised by a connector or by an open connection.
///
/// Messages are carried as strings so the error stays `Clone` and can be
/// published on the session event channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint could not be parsed or uses an unsupported scheme
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// TCP connect or WebSocket handshake failed
    #[error("failed to connect to '{endpoint}': {reason}")]
    ConnectFailed { endpoint: String, reason: String },

    /// Writing a frame failed
    #[error("failed to write frame: {0}")]
    WriteFailed(String),

    /// Reading a frame failed
    #[error("failed to read frame: {0}")]
    ReadFailed(String),

    /// The connection is already gone
    #[error("connection closed")]
    Closed,
}

/// Errors related to loading the appointment catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    /// The catalog is not a valid JSON array of appointment records
    #[error("failed to parse appointments: {0}")]
    Parse(String),

    /// A record has an invalid identifier
    #[error("invalid appointment id: {0}")]
    InvalidId(#[from] ValueObjectError),

    /// A date field is not `YYYY-MM-DD`
    #[error("appointment '{id}' has an invalid date '{value}'")]
    InvalidDate { id: String, value: String },

    /// A time field is not `HH:MM`
    #[error("appointment '{id}' has an invalid time '{value}'")]
    InvalidTime { id: String, value: String },

    /// The start time is not before the end time
    #[error("appointment '{id}' starts at {start} but ends at {end}")]
    InvalidTimeRange {
        id: String,
        start: String,
        end: String,
    },

    /// Two records share the same identifier
    #[error("duplicate appointment id: {0}")]
    DuplicateId(String),
}
