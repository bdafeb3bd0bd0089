use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// The message the remote API attached to the rejection, if it sent one.
    /// Transport failures and undecodable responses carry no server message.
    pub fn server_message(&self) -> Option<&str> {
        let msg = match self {
            ApiError::Auth(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::BadRequest(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::Api { message, .. } => message,
            ApiError::Validation(_) | ApiError::Network(_) | ApiError::MalformedResponse(_) => {
                return None;
            }
        };

        if msg.is_empty() {
            None
        } else {
            Some(msg)
        }
    }
}
