// libs/appointment-cell/src/models.rs
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use shared_models::{Appointment, Doctor};

// ==============================================================================
// SLOT AVAILABILITY MODELS
// ==============================================================================

/// One fixed time-of-day entry in the clinic's bookable hours.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    pub time: NaiveTime,
    pub label: &'static str,
    pub is_available: bool,
}

/// The resolved bookable state of one doctor-day: the catalog with
/// availability flags set, plus the slot-time → canceled-appointment-id
/// mapping that lets a vacated slot be rebooked without creating a
/// duplicate record.
#[derive(Debug, Clone)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub reusable: HashMap<NaiveTime, i64>,
}

impl DayAvailability {
    pub fn slot(&self, time: NaiveTime) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.time == time)
    }

    pub fn reuse_id(&self, time: NaiveTime) -> Option<i64> {
        self.reusable.get(&time).copied()
    }
}

// ==============================================================================
// BOOKING MODELS
// ==============================================================================

/// What the user has picked so far. `existing_id` is set when editing or
/// rescheduling an appointment they already own.
#[derive(Debug, Clone, Default)]
pub struct SlotSelection {
    pub doctor_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub existing_id: Option<i64>,
}

/// The single outbound mutation a selection resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    /// `POST /api/appointments/create`
    Create {
        doctor_id: i64,
        appointment_time: String,
        notes: Option<String>,
    },
    /// `PUT /api/appointments/{id}`; the server resets status to scheduled.
    Update {
        id: i64,
        appointment_time: String,
        notes: Option<String>,
    },
    /// `PUT /api/appointments/{id}` touching only the notes field.
    UpdateNotes { id: i64, notes: String },
}

#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub message: String,
}

/// Mutation acknowledgment; the server echoes the stored time on updates.
#[derive(Debug, Clone, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("Please select a doctor")]
    DoctorNotSelected,

    #[error("Please select a date")]
    DateNotSelected,

    #[error("Please select a time slot")]
    TimeNotSelected,

    #[error("Please log in to book an appointment")]
    NotAuthenticated,

    #[error("Invalid appointment time format. Use HH:MM.")]
    MalformedTime(String),

    #[error("{0}")]
    Rejected(String),
}

// ==============================================================================
// HISTORY FILTER MODELS
// ==============================================================================

/// A patient's appointment annotated with its doctor's details, joined
/// client-side by doctor id.
#[derive(Debug, Clone)]
pub struct AppointmentWithDoctor {
    pub appointment: Appointment,
    pub doctor: Option<Doctor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Scheduled,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub status: StatusFilter,
    pub specialization: Option<String>,
    pub doctor_name: Option<String>,
    pub order: SortOrder,
}
