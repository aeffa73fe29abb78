//! InMemory Repository 実装

pub mod appointment;

pub use appointment::InMemoryAppointmentRepository;
