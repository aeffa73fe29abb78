//! InMemory Appointment Repository 実装
//!
//! ドメイン層が定義する AppointmentRepository trait の具体的な実装。
//! アプリに同梱された JSON（`assets/appointments.json`）を起動時に読み込み、
//! Vec をインメモリ DB として使用します。

use std::collections::HashSet;

use crate::{
    domain::{Appointment, AppointmentError, AppointmentId, AppointmentRepository},
    infrastructure::dto::AppointmentDto,
};

/// JSON bundled into the binary
const BUNDLED_APPOINTMENTS: &str = include_str!("../../../../assets/appointments.json");

/// インメモリ Appointment Repository 実装
pub struct InMemoryAppointmentRepository {
    /// (date, start_time) でソート済み
    appointments: Vec<Appointment>,
}

impl InMemoryAppointmentRepository {
    /// 予約リストから作成する
    ///
    /// # Errors
    ///
    /// 同じ ID の予約が複数ある場合は `AppointmentError::DuplicateId`
    pub fn new(mut appointments: Vec<Appointment>) -> Result<Self, AppointmentError> {
        let mut seen = HashSet::new();
        for appointment in &appointments {
            if !seen.insert(appointment.id.clone()) {
                return Err(AppointmentError::DuplicateId(appointment.id.to_string()));
            }
        }
        appointments.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        Ok(Self { appointments })
    }

    /// JSON 配列から作成する
    pub fn from_json(json: &str) -> Result<Self, AppointmentError> {
        let records: Vec<AppointmentDto> =
            serde_json::from_str(json).map_err(|e| AppointmentError::Parse(e.to_string()))?;
        let appointments = records
            .into_iter()
            .map(Appointment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Loaded {} appointments", appointments.len());
        Self::new(appointments)
    }

    /// 同梱の JSON から作成する
    pub fn bundled() -> Result<Self, AppointmentError> {
        Self::from_json(BUNDLED_APPOINTMENTS)
    }
}

impl AppointmentRepository for InMemoryAppointmentRepository {
    fn all(&self) -> Vec<Appointment> {
        self.appointments.clone()
    }

    fn find_by_id(&self, id: &AppointmentId) -> Option<Appointment> {
        self.appointments.iter().find(|a| &a.id == id).cloned()
    }
}
