use chrono::NaiveTime;

use crate::models::TimeSlot;

/// The clinic's bookable hours. Morning block, lunch break, afternoon
/// block; labels match what the booking screens show.
const CLINIC_HOURS: [(u32, &str); 6] = [
    (9, "9:00 AM"),
    (10, "10:00 AM"),
    (11, "11:00 AM"),
    (14, "2:00 PM"),
    (15, "3:00 PM"),
    (16, "4:00 PM"),
];

/// A fresh copy of the catalog with every slot available. Availability is
/// recomputed per date selection, never accumulated across resolutions.
pub fn slot_catalog() -> Vec<TimeSlot> {
    CLINIC_HOURS
        .iter()
        .map(|&(hour, label)| TimeSlot {
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            label,
            is_available: true,
        })
        .collect()
}
