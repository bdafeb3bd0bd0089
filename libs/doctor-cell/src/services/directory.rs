use std::collections::BTreeSet;

use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::{decode_appointments, Appointment, AppointmentDto, Doctor};

pub struct DoctorDirectoryService {
    api: ApiClient,
}

impl DoctorDirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Fetch the full doctor directory.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        debug!("Fetching doctor directory");

        let doctors: Vec<Doctor> = self
            .api
            .request(Method::GET, "/api/doctors", None, None)
            .await?;

        Ok(doctors)
    }

    /// Fetch every appointment on a doctor's schedule, regardless of date.
    /// Slot availability for a chosen date is resolved from this list.
    pub async fn doctor_schedule(&self, doctor_id: i64, auth_token: &str) -> Result<Vec<Appointment>> {
        debug!("Fetching schedule for doctor {}", doctor_id);

        let path = format!("/api/doctors/{}/appointments", doctor_id);
        let dtos: Vec<AppointmentDto> = self
            .api
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        Ok(decode_appointments(dtos))
    }
}

/// Case-insensitive substring search over name and specialization. An empty
/// or whitespace-only term matches nothing, mirroring a cleared search box.
pub fn search_doctors<'a>(doctors: &'a [Doctor], term: &str) -> Vec<&'a Doctor> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    doctors
        .iter()
        .filter(|doctor| {
            doctor.name.to_lowercase().contains(&term)
                || doctor
                    .specialization
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&term)
        })
        .collect()
}

/// Restrict the directory to one specialization label.
pub fn filter_by_specialization<'a>(doctors: &'a [Doctor], specialization: &str) -> Vec<&'a Doctor> {
    doctors
        .iter()
        .filter(|doctor| doctor.specialization_label() == specialization)
        .collect()
}

/// Distinct specialization labels present in the directory, for populating
/// filter options. Recomputed on every call so it always reflects the
/// latest loaded data.
pub fn specializations(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .map(|doctor| doctor.specialization_label().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
