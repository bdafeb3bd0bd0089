pub mod directory;

pub use directory::DoctorDirectoryService;
pub use directory::{filter_by_specialization, search_doctors, specializations};
