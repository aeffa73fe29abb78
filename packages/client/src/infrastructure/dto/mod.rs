//! Data transfer objects for external data formats.

pub mod appointment;

pub use appointment::{AppointmentDto, RawAppointmentId};
