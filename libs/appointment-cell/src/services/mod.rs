pub mod availability;
pub mod booking;
pub mod catalog;
pub mod history;

pub use availability::resolve_day;
pub use booking::{format_appointment_time, plan_booking, BookingCoordinator};
pub use catalog::slot_catalog;
pub use history::{
    doctor_names, filter_appointments, join_doctors, specializations, status_count,
};
