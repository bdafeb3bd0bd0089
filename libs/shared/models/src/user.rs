use serde::{Deserialize, Serialize};

use crate::appointment::{decode_appointments, Appointment, AppointmentDto};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl Doctor {
    /// Display label for the specialization; doctors without one are
    /// presented as general practitioners.
    pub fn specialization_label(&self) -> &str {
        self.specialization.as_deref().unwrap_or("General")
    }
}

/// The identity the client holds on to between commands once a login
/// succeeds. Denormalized from the profile payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Raw `GET /api/patients/profile` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientProfileDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub appointments: Vec<AppointmentDto>,
}

#[derive(Debug, Clone)]
pub struct PatientProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub appointments: Vec<Appointment>,
}

impl From<PatientProfileDto> for PatientProfile {
    fn from(dto: PatientProfileDto) -> Self {
        PatientProfile {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            appointments: decode_appointments(dto.appointments),
        }
    }
}

impl PatientProfile {
    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
