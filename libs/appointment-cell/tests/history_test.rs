use chrono::NaiveDate;

use appointment_cell::models::{HistoryFilter, SortOrder, StatusFilter};
use appointment_cell::services::history::{
    doctor_names, filter_appointments, join_doctors, specializations, status_count,
};
use shared_models::{Appointment, AppointmentStatus, Doctor};

fn doctor(id: i64, name: &str, specialization: Option<&str>) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        email: format!("doc{}@example.com", id),
        phone: None,
        specialization: specialization.map(str::to_string),
    }
}

fn appointment(id: i64, doctor_id: i64, day: u32, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        patient_id: None,
        doctor_id: Some(doctor_id),
        start: NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        status,
        notes: None,
    }
}

fn sample() -> Vec<appointment_cell::models::AppointmentWithDoctor> {
    let doctors = vec![
        doctor(1, "Dr. Alice", Some("Cardiology")),
        doctor(2, "Dr. Bob", Some("Dermatology")),
    ];
    let appointments = vec![
        appointment(10, 1, 5, AppointmentStatus::Scheduled),
        appointment(11, 2, 3, AppointmentStatus::Canceled),
        appointment(12, 1, 8, AppointmentStatus::Completed),
        appointment(13, 2, 1, AppointmentStatus::Scheduled),
    ];
    join_doctors(appointments, &doctors)
}

#[test]
fn join_annotates_known_doctors_and_keeps_unknown_ones() {
    let doctors = vec![doctor(1, "Dr. Alice", Some("Cardiology"))];
    let entries = join_doctors(
        vec![
            appointment(10, 1, 5, AppointmentStatus::Scheduled),
            appointment(11, 99, 6, AppointmentStatus::Scheduled),
        ],
        &doctors,
    );

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].doctor.as_ref().unwrap().name, "Dr. Alice");
    assert!(entries[1].doctor.is_none());
}

#[test]
fn status_filter_keeps_only_matching_entries() {
    let entries = sample();
    let filtered = filter_appointments(
        &entries,
        &HistoryFilter {
            status: StatusFilter::Scheduled,
            ..Default::default()
        },
    );

    assert_eq!(filtered.len(), 2);
    assert!(filtered
        .iter()
        .all(|e| e.appointment.status == AppointmentStatus::Scheduled));
}

#[test]
fn filters_compose_as_logical_and() {
    let entries = sample();
    let filtered = filter_appointments(
        &entries,
        &HistoryFilter {
            status: StatusFilter::Scheduled,
            specialization: Some("Dermatology".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].appointment.id, 13);
}

#[test]
fn doctor_name_filter_matches_exactly() {
    let entries = sample();
    let filtered = filter_appointments(
        &entries,
        &HistoryFilter {
            doctor_name: Some("Dr. Alice".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(filtered.len(), 2);
    assert!(filtered
        .iter()
        .all(|e| e.doctor.as_ref().unwrap().name == "Dr. Alice"));
}

#[test]
fn oldest_first_sort_is_non_decreasing() {
    let entries = sample();
    let filtered = filter_appointments(
        &entries,
        &HistoryFilter {
            order: SortOrder::OldestFirst,
            ..Default::default()
        },
    );

    assert!(filtered
        .windows(2)
        .all(|pair| pair[0].appointment.start <= pair[1].appointment.start));
}

#[test]
fn newest_first_is_the_default_order() {
    let entries = sample();
    let filtered = filter_appointments(&entries, &HistoryFilter::default());

    assert_eq!(filtered.len(), 4);
    assert!(filtered
        .windows(2)
        .all(|pair| pair[0].appointment.start >= pair[1].appointment.start));
}

#[test]
fn filtering_does_not_mutate_the_source_list() {
    let entries = sample();
    let before: Vec<i64> = entries.iter().map(|e| e.appointment.id).collect();

    let _ = filter_appointments(
        &entries,
        &HistoryFilter {
            order: SortOrder::OldestFirst,
            ..Default::default()
        },
    );

    let after: Vec<i64> = entries.iter().map(|e| e.appointment.id).collect();
    assert_eq!(before, after);
}

#[test]
fn facets_are_distinct_and_reflect_the_current_list() {
    let entries = sample();

    assert_eq!(
        specializations(&entries),
        vec!["Cardiology".to_string(), "Dermatology".to_string()]
    );
    assert_eq!(
        doctor_names(&entries),
        vec!["Dr. Alice".to_string(), "Dr. Bob".to_string()]
    );
}

#[test]
fn status_counts_match_the_list() {
    let entries = sample();

    assert_eq!(status_count(&entries, AppointmentStatus::Scheduled), 2);
    assert_eq!(status_count(&entries, AppointmentStatus::Canceled), 1);
    assert_eq!(status_count(&entries, AppointmentStatus::Completed), 1);
}
