use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Wire format for appointment timestamps, shared with the remote API.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Canceled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Canceled => write!(f, "canceled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "canceled" => Ok(AppointmentStatus::Canceled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}

/// An appointment as the client reasons about it. Identity is the
/// server-assigned id; the client never invents one.
///
/// `patient_id` and `doctor_id` are optional because the API omits the one
/// implied by context: the profile payload carries `doctor_id` only, a
/// doctor's schedule carries `patient_id` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub start: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl Appointment {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.start.time()
    }
}

/// Raw appointment record as the API serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDto {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    pub appointment_time: String,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<AppointmentDto> for Appointment {
    type Error = String;

    fn try_from(dto: AppointmentDto) -> Result<Self, Self::Error> {
        let start = NaiveDateTime::parse_from_str(&dto.appointment_time, WIRE_DATETIME_FORMAT)
            .map_err(|_| format!("unparsable appointment_time: {}", dto.appointment_time))?;
        let status = dto.status.parse::<AppointmentStatus>()?;

        Ok(Appointment {
            id: dto.id,
            patient_id: dto.patient_id,
            doctor_id: dto.doctor_id,
            start,
            status,
            notes: dto.notes,
        })
    }
}

/// Validate a batch of raw records at the API boundary. Records the server
/// sent in a shape the client cannot interpret are logged and dropped
/// rather than poisoning the whole response.
pub fn decode_appointments(dtos: Vec<AppointmentDto>) -> Vec<Appointment> {
    dtos.into_iter()
        .filter_map(|dto| {
            let id = dto.id;
            match Appointment::try_from(dto) {
                Ok(appointment) => Some(appointment),
                Err(reason) => {
                    warn!("Skipping malformed appointment {}: {}", id, reason);
                    None
                }
            }
        })
        .collect()
}
