use anyhow::{anyhow, Result};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::{CurrentUser, PatientProfile, PatientProfileDto};

use crate::models::{AckResponse, LoginResponse, RegisterRequest, Session, UpdateProfileRequest};
use crate::session::SessionStore;

pub struct AuthService {
    api: ApiClient,
    store: SessionStore,
}

impl AuthService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
            store: SessionStore::new(config),
        }
    }

    /// Register a new patient account. Validation failures are reported
    /// locally; nothing is sent to the API.
    pub async fn register(&self, request: RegisterRequest) -> Result<String> {
        request.validate().map_err(|msg| anyhow!(msg))?;
        debug!("Registering patient {}", request.email);

        let ack: AckResponse = self
            .api
            .request(
                Method::POST,
                "/api/patients/register",
                None,
                Some(json!({
                    "name": request.name,
                    "email": request.email,
                    "password": request.password,
                    "phone": request.phone,
                })),
            )
            .await?;

        Ok(ack
            .msg
            .unwrap_or_else(|| "Patient registered successfully".to_string()))
    }

    /// Exchange credentials for a token, fetch the profile behind it, and
    /// persist both as the current session.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser> {
        debug!("Logging in {}", email);

        let response: LoginResponse = self
            .api
            .request(
                Method::POST,
                "/api/patients/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await?;

        let profile_dto: PatientProfileDto = self
            .api
            .request(
                Method::GET,
                "/api/patients/profile",
                Some(&response.access_token),
                None,
            )
            .await?;

        let profile = PatientProfile::from(profile_dto);
        let user = profile.current_user();

        self.store.save(&Session {
            access_token: response.access_token,
            user: user.clone(),
        })?;

        info!("Logged in as patient {}", user.id);
        Ok(user)
    }

    /// Drop the persisted session. Safe to call when already logged out.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()
    }

    pub fn session(&self) -> Option<Session> {
        self.store.load()
    }

    /// The persisted session, or a user-facing error when there is none.
    pub fn require_session(&self) -> Result<Session> {
        self.store
            .load()
            .ok_or_else(|| anyhow!("Please log in to continue"))
    }

    /// Fetch the profile of the logged-in patient, appointments included.
    pub async fn profile(&self) -> Result<PatientProfile> {
        let session = self.require_session()?;
        debug!("Fetching profile for patient {}", session.user.id);

        let dto: PatientProfileDto = self
            .api
            .request(
                Method::GET,
                "/api/patients/profile",
                Some(&session.access_token),
                None,
            )
            .await?;

        Ok(PatientProfile::from(dto))
    }

    /// Update the patient's contact details and refresh the stored
    /// current-user record to match.
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<String> {
        request.validate().map_err(|msg| anyhow!(msg))?;
        let session = self.require_session()?;
        debug!("Updating profile for patient {}", session.user.id);

        let ack: AckResponse = self
            .api
            .request(
                Method::PUT,
                "/api/patients/profile",
                Some(&session.access_token),
                Some(json!({
                    "name": request.name,
                    "email": request.email,
                    "phone": request.phone,
                })),
            )
            .await?;

        self.store.save(&Session {
            access_token: session.access_token,
            user: CurrentUser {
                id: session.user.id,
                name: request.name,
                email: request.email,
                phone: Some(request.phone),
            },
        })?;

        Ok(ack
            .msg
            .unwrap_or_else(|| "Patient information updated successfully".to_string()))
    }
}
