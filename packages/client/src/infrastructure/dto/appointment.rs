//! Appointment records as they appear in the bundled JSON file.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Appointment, AppointmentError, AppointmentId};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Identifier as written in the source data: either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAppointmentId {
    Number(u64),
    Text(String),
}

impl RawAppointmentId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One appointment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: RawAppointmentId,
    pub period: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub patient_name: String,
    pub room: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    #[serde(default)]
    pub has_conflict: bool,
    #[serde(default)]
    pub patient_info: String,
}

impl TryFrom<AppointmentDto> for Appointment {
    type Error = AppointmentError;

    fn try_from(dto: AppointmentDto) -> Result<Self, Self::Error> {
        let id = AppointmentId::new(dto.id.into_string())?;

        let date = NaiveDate::parse_from_str(&dto.date, DATE_FORMAT).map_err(|_| {
            AppointmentError::InvalidDate {
                id: id.to_string(),
                value: dto.date.clone(),
            }
        })?;
        let start_time = parse_time(&id, &dto.start_time)?;
        let end_time = parse_time(&id, &dto.end_time)?;
        if start_time >= end_time {
            return Err(AppointmentError::InvalidTimeRange {
                id: id.to_string(),
                start: dto.start_time,
                end: dto.end_time,
            });
        }

        Ok(Appointment {
            id,
            period: dto.period,
            kind: dto.kind,
            title: dto.title,
            patient_name: dto.patient_name,
            room: dto.room,
            date,
            start_time,
            end_time,
            has_conflict: dto.has_conflict,
            patient_info: dto.patient_info,
        })
    }
}

fn parse_time(id: &AppointmentId, value: &str) -> Result<NaiveTime, AppointmentError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| AppointmentError::InvalidTime {
        id: id.to_string(),
        value: value.to_string(),
    })
}
