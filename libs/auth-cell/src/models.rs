use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use shared_models::CurrentUser;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Generic `{"msg": "..."}` acknowledgment the API returns for mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

// ==============================================================================
// SESSION MODEL
// ==============================================================================

/// What a successful login leaves behind: the bearer token plus a
/// denormalized copy of the patient record, persisted until logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub user: CurrentUser,
}

// ==============================================================================
// LOCAL VALIDATION
// ==============================================================================

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap())
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{10}$").unwrap())
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z ]+$").unwrap())
}

impl RegisterRequest {
    /// Client-side mirror of the server's registration rules; a violation
    /// is reported immediately and no request is sent.
    pub fn validate(&self) -> Result<(), String> {
        if !name_re().is_match(&self.name) {
            return Err("Invalid name format. Must contain only letters and spaces.".to_string());
        }
        if !email_re().is_match(&self.email) {
            return Err("Invalid email format".to_string());
        }
        if self.password.len() < 6 {
            return Err("Password must be at least 6 characters long".to_string());
        }
        if !phone_re().is_match(&self.phone) {
            return Err("Invalid phone number format. Must be 10 digits.".to_string());
        }
        Ok(())
    }
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !name_re().is_match(&self.name) {
            return Err("Invalid name format. Must contain only letters and spaces.".to_string());
        }
        if !email_re().is_match(&self.email) {
            return Err("Invalid email format".to_string());
        }
        if !phone_re().is_match(&self.phone) {
            return Err("Invalid phone number format. Must be 10 digits.".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let mut req = request();
        req.password = "abc".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_non_numeric_phone() {
        let mut req = request();
        req.phone = "555-123-4567".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_email_without_domain() {
        let mut req = request();
        req.email = "jane@nowhere".to_string();
        assert!(req.validate().is_err());
    }
}
