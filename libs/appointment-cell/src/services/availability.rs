use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, warn};

use shared_models::{Appointment, AppointmentStatus};

use crate::models::DayAvailability;
use crate::services::catalog::slot_catalog;

/// Resolve which catalog slots are bookable for one doctor on one date.
///
/// Takes the doctor's full appointment list (any dates) and the current
/// local date-time; passing `now` in keeps resolution pure and
/// deterministic. Performs no I/O.
pub fn resolve_day(
    appointments: &[Appointment],
    selected_date: NaiveDate,
    now: NaiveDateTime,
) -> DayAvailability {
    let mut slots = slot_catalog();
    let mut reusable: HashMap<_, i64> = HashMap::new();

    // No booking into the past, and no same-hour booking on the current day.
    if selected_date == now.date() {
        for slot in &mut slots {
            if slot.time.hour() <= now.hour() {
                slot.is_available = false;
            }
        }
    }

    for appointment in appointments {
        if appointment.date() != selected_date {
            continue;
        }

        let Some(slot) = slots.iter_mut().find(|s| s.time == appointment.time()) else {
            warn!(
                "Appointment {} at {} matches no catalog slot, ignoring",
                appointment.id,
                appointment.time()
            );
            continue;
        };

        match appointment.status {
            AppointmentStatus::Scheduled => slot.is_available = false,
            // A canceled appointment leaves its slot bookable; remember its
            // id so rebooking reuses the record instead of creating another.
            AppointmentStatus::Canceled => {
                reusable.insert(appointment.time(), appointment.id);
            }
            AppointmentStatus::Completed => {}
        }
    }

    debug!(
        "Resolved {}: {} of {} slots available, {} reusable",
        selected_date,
        slots.iter().filter(|s| s.is_available).count(),
        slots.len(),
        reusable.len()
    );

    DayAvailability {
        date: selected_date,
        slots,
        reusable,
    }
}
