use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};

use appointment_cell::models::{HistoryFilter, SlotSelection, SortOrder, StatusFilter};
use appointment_cell::services::availability::resolve_day;
use appointment_cell::services::booking::{plan_booking, BookingCoordinator};
use appointment_cell::services::history::{
    filter_appointments, join_doctors, status_count,
};
use auth_cell::models::{RegisterRequest, UpdateProfileRequest};
use auth_cell::services::auth::AuthService;
use doctor_cell::services::directory::{
    filter_by_specialization, search_doctors, DoctorDirectoryService,
};
use shared_config::AppConfig;
use shared_models::{AppointmentStatus, WIRE_DATETIME_FORMAT};

#[derive(Parser)]
#[command(name = "medibook", about = "Patient appointment booking client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new patient account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: String,
    },
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the logged-in patient's profile
    Profile,
    /// Update the patient's contact details
    UpdateProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// List doctors, optionally searched or filtered by specialization
    Doctors {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
    },
    /// Show a doctor's bookable time slots for a date
    Slots {
        #[arg(long)]
        doctor: i64,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Book an appointment
    Book {
        #[arg(long)]
        doctor: i64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        time: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Move an existing appointment to a new date and time
    Reschedule {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        time: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change only the notes on an appointment
    UpdateNotes {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        notes: String,
    },
    /// Cancel an appointment
    Cancel {
        #[arg(long)]
        id: i64,
    },
    /// Show appointment history with filters
    History {
        #[arg(long, value_enum, default_value = "all")]
        status: StatusArg,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long)]
        doctor_name: Option<String>,
        #[arg(long, value_enum, default_value = "new")]
        order: OrderArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Scheduled,
    Canceled,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Scheduled => StatusFilter::Scheduled,
            StatusArg::Canceled => StatusFilter::Canceled,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    New,
    Old,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::New => SortOrder::NewestFirst,
            OrderArg::Old => SortOrder::OldestFirst,
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if !config.is_configured() {
        bail!("CLINIC_API_URL is not set");
    }

    match cli.command {
        Command::Register {
            name,
            email,
            password,
            phone,
        } => {
            let msg = AuthService::new(&config)
                .register(RegisterRequest {
                    name,
                    email,
                    password,
                    phone,
                })
                .await?;
            println!("{msg}");
        }
        Command::Login { email, password } => {
            let user = AuthService::new(&config).login(&email, &password).await?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            AuthService::new(&config).logout()?;
            println!("Logged out");
        }
        Command::Profile => show_profile(&config).await?,
        Command::UpdateProfile { name, email, phone } => {
            let msg = AuthService::new(&config)
                .update_profile(UpdateProfileRequest { name, email, phone })
                .await?;
            println!("{msg}");
        }
        Command::Doctors {
            search,
            specialization,
        } => list_doctors(&config, search, specialization).await?,
        Command::Slots { doctor, date } => show_slots(&config, doctor, date).await?,
        Command::Book {
            doctor,
            date,
            time,
            notes,
        } => book(&config, doctor, date, time, notes).await?,
        Command::Reschedule {
            id,
            date,
            time,
            notes,
        } => reschedule(&config, id, date, time, notes).await?,
        Command::UpdateNotes { id, notes } => update_notes(&config, id, notes).await?,
        Command::Cancel { id } => {
            let auth = AuthService::new(&config);
            let session = auth.require_session()?;
            let outcome = BookingCoordinator::new(&config)
                .cancel(id, &session.access_token)
                .await?;
            println!("{}", outcome.message);
        }
        Command::History {
            status,
            specialization,
            doctor_name,
            order,
        } => {
            show_history(
                &config,
                HistoryFilter {
                    status: status.into(),
                    specialization,
                    doctor_name,
                    order: order.into(),
                },
            )
            .await?
        }
    }

    Ok(())
}

async fn show_profile(config: &AppConfig) -> Result<()> {
    let profile = AuthService::new(config).profile().await?;

    println!("{} <{}>", profile.name, profile.email);
    if let Some(phone) = &profile.phone {
        println!("Phone: {phone}");
    }
    println!("Appointments: {}", profile.appointments.len());
    Ok(())
}

async fn list_doctors(
    config: &AppConfig,
    search: Option<String>,
    specialization: Option<String>,
) -> Result<()> {
    let doctors = DoctorDirectoryService::new(config).list_doctors().await?;

    let selected: Vec<&shared_models::Doctor> = match (&search, &specialization) {
        (Some(term), _) => search_doctors(&doctors, term),
        (None, Some(spec)) => filter_by_specialization(&doctors, spec),
        (None, None) => doctors.iter().collect(),
    };

    if selected.is_empty() {
        println!("No doctors found");
        return Ok(());
    }

    for doctor in selected {
        println!(
            "{:>4}  {:<24} {}",
            doctor.id,
            doctor.name,
            doctor.specialization_label()
        );
    }
    Ok(())
}

async fn show_slots(config: &AppConfig, doctor: i64, date: NaiveDate) -> Result<()> {
    let auth = AuthService::new(config);
    let session = auth.require_session()?;

    let schedule = DoctorDirectoryService::new(config)
        .doctor_schedule(doctor, &session.access_token)
        .await?;
    let resolved = resolve_day(&schedule, date, Local::now().naive_local());

    println!("Slots for doctor {} on {}:", doctor, date);
    for slot in &resolved.slots {
        let state = if slot.is_available { "available" } else { "taken" };
        print!("  {:<9} {}", slot.label, state);
        if resolved.reuse_id(slot.time).is_some() {
            print!("  (rebooks a canceled appointment)");
        }
        println!();
    }
    Ok(())
}

async fn book(
    config: &AppConfig,
    doctor: i64,
    date: NaiveDate,
    time: String,
    notes: Option<String>,
) -> Result<()> {
    let auth = AuthService::new(config);
    let session = auth.require_session()?;

    let schedule = DoctorDirectoryService::new(config)
        .doctor_schedule(doctor, &session.access_token)
        .await?;
    let resolved = resolve_day(&schedule, date, Local::now().naive_local());

    let reuse_id = match NaiveTime::parse_from_str(&time, "%H:%M") {
        Ok(slot_time) => {
            match resolved.slot(slot_time) {
                Some(slot) if !slot.is_available => {
                    bail!("The {} slot on {} is not available", time, date)
                }
                Some(_) => {}
                None => bail!("{} is not one of the clinic's bookable times", time),
            }
            resolved.reuse_id(slot_time)
        }
        // Let the coordinator's own validation report the malformed time.
        Err(_) => None,
    };

    let action = plan_booking(
        &SlotSelection {
            doctor_id: Some(doctor),
            date: Some(date),
            time: Some(time),
            notes,
            existing_id: None,
        },
        reuse_id,
    )?;

    let outcome = BookingCoordinator::new(config)
        .dispatch(&action, &session.access_token)
        .await?;
    println!("{}", outcome.message);
    Ok(())
}

async fn reschedule(
    config: &AppConfig,
    id: i64,
    date: NaiveDate,
    time: String,
    notes: Option<String>,
) -> Result<()> {
    let auth = AuthService::new(config);
    let session = auth.require_session()?;

    let profile = auth.profile().await?;
    let appointment = profile
        .appointments
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| anyhow!("No appointment #{} on your profile", id))?;
    let doctor = appointment
        .doctor_id
        .ok_or_else(|| anyhow!("Appointment #{} has no doctor on record", id))?;

    let schedule = DoctorDirectoryService::new(config)
        .doctor_schedule(doctor, &session.access_token)
        .await?;
    let resolved = resolve_day(&schedule, date, Local::now().naive_local());

    if let Ok(slot_time) = NaiveTime::parse_from_str(&time, "%H:%M") {
        if let Some(slot) = resolved.slot(slot_time) {
            if !slot.is_available {
                bail!("The {} slot on {} is not available", time, date);
            }
        }
    }

    let action = plan_booking(
        &SlotSelection {
            doctor_id: Some(doctor),
            date: Some(date),
            time: Some(time),
            notes: notes.or_else(|| appointment.notes.clone()),
            existing_id: Some(id),
        },
        None,
    )?;

    let outcome = BookingCoordinator::new(config)
        .dispatch(&action, &session.access_token)
        .await?;
    println!("{}", outcome.message);
    Ok(())
}

async fn update_notes(config: &AppConfig, id: i64, notes: String) -> Result<()> {
    let auth = AuthService::new(config);
    let session = auth.require_session()?;

    let action = plan_booking(
        &SlotSelection {
            existing_id: Some(id),
            notes: Some(notes),
            ..Default::default()
        },
        None,
    )?;

    let outcome = BookingCoordinator::new(config)
        .dispatch(&action, &session.access_token)
        .await?;
    println!("{}", outcome.message);
    Ok(())
}

async fn show_history(config: &AppConfig, filter: HistoryFilter) -> Result<()> {
    let auth = AuthService::new(config);
    let profile = auth.profile().await?;
    let doctors = DoctorDirectoryService::new(config).list_doctors().await?;

    let entries = join_doctors(profile.appointments, &doctors);
    let filtered = filter_appointments(&entries, &filter);

    if filtered.is_empty() {
        println!("No appointments match");
    }
    for entry in &filtered {
        let doctor_label = entry
            .doctor
            .as_ref()
            .map(|d| format!("{} ({})", d.name, d.specialization_label()))
            .unwrap_or_else(|| "Unknown doctor".to_string());
        print!(
            "#{:<5} {}  {:<9} {}",
            entry.appointment.id,
            entry.appointment.start.format(WIRE_DATETIME_FORMAT),
            entry.appointment.status.to_string(),
            doctor_label
        );
        if let Some(notes) = &entry.appointment.notes {
            print!("  - {notes}");
        }
        println!();
    }

    println!(
        "\n{} scheduled, {} canceled, {} completed",
        status_count(&entries, AppointmentStatus::Scheduled),
        status_count(&entries, AppointmentStatus::Canceled),
        status_count(&entries, AppointmentStatus::Completed),
    );
    Ok(())
}
