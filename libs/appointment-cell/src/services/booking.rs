// libs/appointment-cell/src/services/booking.rs
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{info, warn};

use shared_api::ApiClient;
use shared_config::AppConfig;

use crate::models::{
    BookingAction, BookingError, BookingOutcome, MutationResponse, SlotSelection,
};

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}$").unwrap())
}

/// Combine a calendar date and an "HH:MM" time into the wire timestamp.
/// Malformed times fail here, before any request is constructed.
pub fn format_appointment_time(date: NaiveDate, time: &str) -> Result<String, BookingError> {
    if !time_re().is_match(time) {
        return Err(BookingError::MalformedTime(time.to_string()));
    }
    if chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() {
        return Err(BookingError::MalformedTime(time.to_string()));
    }

    Ok(format!("{} {}", date.format("%Y-%m-%d"), time))
}

/// Decide which single mutation a selection resolves to. Pure: checks the
/// preconditions and picks create vs update, but sends nothing.
///
/// `reuse_id` is the canceled appointment occupying the chosen slot, if
/// any; booking into such a slot updates that record instead of creating
/// a duplicate.
pub fn plan_booking(
    selection: &SlotSelection,
    reuse_id: Option<i64>,
) -> Result<BookingAction, BookingError> {
    // Notes-only edit: an existing appointment with no schedule change.
    if let Some(id) = selection.existing_id {
        if selection.date.is_none() && selection.time.is_none() {
            return Ok(BookingAction::UpdateNotes {
                id,
                notes: selection.notes.clone().unwrap_or_default(),
            });
        }
    }

    let doctor_id = selection.doctor_id.ok_or(BookingError::DoctorNotSelected)?;
    let date = selection.date.ok_or(BookingError::DateNotSelected)?;
    let time = selection.time.as_deref().ok_or(BookingError::TimeNotSelected)?;
    let appointment_time = format_appointment_time(date, time)?;

    match selection.existing_id.or(reuse_id) {
        Some(id) => Ok(BookingAction::Update {
            id,
            appointment_time,
            notes: selection.notes.clone(),
        }),
        None => Ok(BookingAction::Create {
            doctor_id,
            appointment_time,
            notes: selection.notes.clone(),
        }),
    }
}

/// Issues exactly one mutation per user action and interprets the
/// response. Does not refresh any local state; callers reload after a
/// success. Nothing is retried.
pub struct BookingCoordinator {
    api: ApiClient,
}

impl BookingCoordinator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub async fn dispatch(
        &self,
        action: &BookingAction,
        auth_token: &str,
    ) -> Result<BookingOutcome, BookingError> {
        match action {
            BookingAction::Create {
                doctor_id,
                appointment_time,
                notes,
            } => {
                info!("Booking appointment with doctor {} at {}", doctor_id, appointment_time);
                self.send(
                    Method::POST,
                    "/api/appointments/create".to_string(),
                    json!({
                        "doctor_id": doctor_id,
                        "appointment_time": appointment_time,
                        "notes": notes,
                    }),
                    "Failed to book appointment. Please try again.",
                    auth_token,
                )
                .await
            }
            BookingAction::Update {
                id,
                appointment_time,
                notes,
            } => {
                info!("Rescheduling appointment {} to {}", id, appointment_time);
                self.send(
                    Method::PUT,
                    format!("/api/appointments/{}", id),
                    json!({
                        "appointment_time": appointment_time,
                        "notes": notes,
                        "status": "scheduled",
                    }),
                    "Failed to update appointment. Please try again.",
                    auth_token,
                )
                .await
            }
            BookingAction::UpdateNotes { id, notes } => {
                info!("Updating notes on appointment {}", id);
                self.send(
                    Method::PUT,
                    format!("/api/appointments/{}", id),
                    json!({ "notes": notes }),
                    "Failed to update appointment. Please try again.",
                    auth_token,
                )
                .await
            }
        }
    }

    /// Request cancellation; the server flips the status, nothing is
    /// deleted client-side.
    pub async fn cancel(&self, id: i64, auth_token: &str) -> Result<BookingOutcome, BookingError> {
        info!("Canceling appointment {}", id);
        self.send(
            Method::DELETE,
            format!("/api/appointments/{}", id),
            Value::Null,
            "Failed to cancel appointment. Please try again.",
            auth_token,
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: String,
        body: Value,
        fallback: &str,
        auth_token: &str,
    ) -> Result<BookingOutcome, BookingError> {
        let body = if body.is_null() { None } else { Some(body) };

        match self
            .api
            .request::<MutationResponse>(method, &path, Some(auth_token), body)
            .await
        {
            Ok(response) => Ok(BookingOutcome {
                message: response.msg.unwrap_or_else(|| "OK".to_string()),
            }),
            Err(err) => {
                warn!("Mutation to {} failed: {}", path, err);
                Err(BookingError::Rejected(
                    err.server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| fallback.to_string()),
                ))
            }
        }
    }
}
