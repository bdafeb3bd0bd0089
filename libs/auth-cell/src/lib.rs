pub mod models;
pub mod session;
pub mod services;

pub use models::*;
pub use session::SessionStore;
pub use services::*;
