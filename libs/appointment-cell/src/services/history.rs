use std::collections::BTreeSet;

use shared_models::{Appointment, AppointmentStatus, Doctor};

use crate::models::{AppointmentWithDoctor, HistoryFilter, SortOrder, StatusFilter};

/// Annotate each appointment with its doctor's record, matched by id.
/// Appointments referencing an unknown doctor keep a `None` doctor and
/// still display.
pub fn join_doctors(
    appointments: Vec<Appointment>,
    doctors: &[Doctor],
) -> Vec<AppointmentWithDoctor> {
    appointments
        .into_iter()
        .map(|appointment| {
            let doctor = appointment
                .doctor_id
                .and_then(|id| doctors.iter().find(|d| d.id == id).cloned());
            AppointmentWithDoctor {
                appointment,
                doctor,
            }
        })
        .collect()
}

fn matches(entry: &AppointmentWithDoctor, filter: &HistoryFilter) -> bool {
    match filter.status {
        StatusFilter::All => {}
        StatusFilter::Scheduled => {
            if entry.appointment.status != AppointmentStatus::Scheduled {
                return false;
            }
        }
        StatusFilter::Canceled => {
            if entry.appointment.status != AppointmentStatus::Canceled {
                return false;
            }
        }
    }

    if let Some(specialization) = &filter.specialization {
        let entry_spec = entry
            .doctor
            .as_ref()
            .map(|d| d.specialization_label())
            .unwrap_or("General");
        if entry_spec != specialization {
            return false;
        }
    }

    if let Some(doctor_name) = &filter.doctor_name {
        if entry.doctor.as_ref().map(|d| d.name.as_str()) != Some(doctor_name.as_str()) {
            return false;
        }
    }

    true
}

/// Apply all active filters as a logical AND, then sort chronologically.
/// Returns a new list; the source is never mutated. Ties between equal
/// timestamps land in no particular order.
pub fn filter_appointments(
    entries: &[AppointmentWithDoctor],
    filter: &HistoryFilter,
) -> Vec<AppointmentWithDoctor> {
    let mut result: Vec<AppointmentWithDoctor> = entries
        .iter()
        .filter(|entry| matches(entry, filter))
        .cloned()
        .collect();

    result.sort_by(|a, b| match filter.order {
        SortOrder::NewestFirst => b.appointment.start.cmp(&a.appointment.start),
        SortOrder::OldestFirst => a.appointment.start.cmp(&b.appointment.start),
    });

    result
}

/// Distinct specializations across the loaded appointments, for filter
/// options. Recomputed on every call.
pub fn specializations(entries: &[AppointmentWithDoctor]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            entry
                .doctor
                .as_ref()
                .map(|d| d.specialization_label())
                .unwrap_or("General")
                .to_string()
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct doctor names across the loaded appointments.
pub fn doctor_names(entries: &[AppointmentWithDoctor]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| entry.doctor.as_ref().map(|d| d.name.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// How many appointments in the list carry the given status.
pub fn status_count(entries: &[AppointmentWithDoctor], status: AppointmentStatus) -> usize {
    entries
        .iter()
        .filter(|entry| entry.appointment.status == status)
        .count()
}
