//! Appointment domain model.

use chrono::{NaiveDate, NaiveTime};

use super::value_object::AppointmentId;

/// One scheduled visit shown in the appointment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    /// Part of the day the slot belongs to (e.g. "morning")
    pub period: String,
    /// Visit category (`type` in the source data)
    pub kind: String,
    pub title: String,
    pub patient_name: String,
    pub room: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Set when the slot overlaps another booking
    pub has_conflict: bool,
    /// Free-form notes about the patient
    pub patient_info: String,
}

impl Appointment {
    /// Length of the visit in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}
