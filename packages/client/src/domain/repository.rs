//! Repository traits.
//!
//! The domain defines what it needs; the infrastructure layer provides the
//! implementation (dependency inversion).

use super::{appointment::Appointment, value_object::AppointmentId};

/// Read-only access to the appointment catalog
pub trait AppointmentRepository: Send + Sync {
    /// All appointments ordered by date, then start time
    fn all(&self) -> Vec<Appointment>;

    /// Look up one appointment
    fn find_by_id(&self, id: &AppointmentId) -> Option<Appointment>;

    /// Appointments flagged as conflicting, in the same order as `all`
    fn conflicting(&self) -> Vec<Appointment> {
        self.all().into_iter().filter(|a| a.has_conflict).collect()
    }
}
