use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    appointment::{Appointment, AppointmentStatus},
    doctor::Doctor,
    id::{AppointmentId, UserId},
    registration::{Credentials, RegistrationPayload},
    session::{Session, SessionToken},
    user::User,
};

pub const UNEXPECTED_RESPONSE_FORMAT: &str = "Unexpected response format.";

/// Failures talking to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered and refused the request.
    #[error("Request failed ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The request never got an answer.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with something this client cannot read.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Message for a single error banner. Server messages are shown verbatim,
    /// transport failures collapse into `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::MalformedResponse(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/auth/login`. Success always carries both user and token.
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;
    /// `POST /api/auth/register`.
    async fn register(&self, payload: &RegistrationPayload) -> Result<Session, ApiError>;
}

#[async_trait]
pub trait DoctorApi: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn current_user(&self, token: &SessionToken) -> Result<User, ApiError>;
}

#[async_trait]
pub trait AppointmentApi: Send + Sync {
    async fn list_appointments(
        &self,
        token: &SessionToken,
        user_id: &UserId,
    ) -> Result<Vec<Appointment>, ApiError>;

    async fn update_status(
        &self,
        token: &SessionToken,
        appointment_id: &AppointmentId,
        status: &AppointmentStatus,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let error = ApiError::Rejected {
            status: 401,
            message: "Invalid email or password.".to_string(),
        };
        assert_eq!(error.user_message("Login failed."), "Invalid email or password.");
        assert!(error.is_unauthorized());
    }

    #[test]
    fn test_user_message_falls_back_for_transport_errors() {
        let error = ApiError::Network("connection refused".to_string());
        assert_eq!(error.user_message("Login failed."), "Login failed.");

        let error = ApiError::Rejected {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(error.user_message("Login failed."), "Login failed.");
    }
}
