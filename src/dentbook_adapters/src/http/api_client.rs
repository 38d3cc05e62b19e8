use dentbook_core::{
    ApiError, Appointment, AppointmentApi, AppointmentId, AppointmentStatus, AuthApi,
    Credentials, Doctor, DoctorApi, ProfileApi, RegistrationPayload, Session, SessionToken,
    UNEXPECTED_RESPONSE_FORMAT, User, UserId,
};
use reqwest::{Client, RequestBuilder, header::AUTHORIZATION};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::http::doctor_record::normalize_doctor_list;

/// Upper bound on server text surfaced in an error banner.
const MAX_ERROR_CHARS: usize = 200;

// Relative so they resolve under any path prefix of the base URL.
const LOGIN_PATH: &str = "api/auth/login";
const REGISTER_PATH: &str = "api/auth/register";
const DOCTOR_PATH: &str = "api/doctor";
const USER_PATH: &str = "api/user";
const APPOINTMENT_PATH: &str = "api/appointment";

/// Client for the booking backend. Every endpoint answers with
/// `{ "data": ... }` on success or `{ "error": "..." }` on failure.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http_client: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(mut base_url: Url, http_client: Client) -> Self {
        // `Url::join` drops the last path segment unless it ends with `/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Network(format!("Invalid request URL: {e}")))
    }

    /// Sends `request` and returns the envelope's `data`, if any.
    async fn send(&self, request: RequestBuilder) -> Result<Option<Value>, ApiError> {
        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;
        let envelope = serde_json::from_str::<Envelope>(&body).ok();

        if !status.is_success() {
            let message = match envelope {
                Some(envelope) => envelope.error.as_deref().map(sanitize_body).unwrap_or_default(),
                None => sanitize_body(&body),
            };
            tracing::debug!(status = status.as_u16(), "Request rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        match envelope {
            Some(Envelope {
                error: Some(error), ..
            }) => Err(ApiError::Rejected {
                status: status.as_u16(),
                message: sanitize_body(&error),
            }),
            Some(envelope) => Ok(envelope.data),
            None => Err(malformed()),
        }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpApiClient {
    #[tracing::instrument(name = "HttpApiClient::login", skip_all)]
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let request_body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.as_ref().expose_secret(),
        };

        let data = self
            .send(self.http_client.post(self.url(LOGIN_PATH)?).json(&request_body))
            .await?;
        decode(data)
    }

    #[tracing::instrument(name = "HttpApiClient::register", skip_all)]
    async fn register(&self, payload: &RegistrationPayload) -> Result<Session, ApiError> {
        let request_body = RegisterRequest {
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            dob: payload.dob.as_deref(),
            phone: payload.phone.as_deref(),
            email: &payload.email,
            password: payload.password.as_ref().expose_secret(),
        };

        let data = self
            .send(self.http_client.post(self.url(REGISTER_PATH)?).json(&request_body))
            .await?;
        decode(data)
    }
}

#[async_trait::async_trait]
impl DoctorApi for HttpApiClient {
    #[tracing::instrument(name = "HttpApiClient::list_doctors", skip_all)]
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        let data = self.send(self.http_client.get(self.url(DOCTOR_PATH)?)).await?;
        normalize_doctor_list(data)
    }
}

#[async_trait::async_trait]
impl ProfileApi for HttpApiClient {
    #[tracing::instrument(name = "HttpApiClient::current_user", skip_all)]
    async fn current_user(&self, token: &SessionToken) -> Result<User, ApiError> {
        let request = self
            .http_client
            .get(self.url(USER_PATH)?)
            .header(AUTHORIZATION, token.bearer_header());

        decode(self.send(request).await?)
    }
}

#[async_trait::async_trait]
impl AppointmentApi for HttpApiClient {
    #[tracing::instrument(name = "HttpApiClient::list_appointments", skip(self, token))]
    async fn list_appointments(
        &self,
        token: &SessionToken,
        user_id: &UserId,
    ) -> Result<Vec<Appointment>, ApiError> {
        let request = self
            .http_client
            .get(self.url(APPOINTMENT_PATH)?)
            .query(&[("user", user_id.as_str())])
            .header(AUTHORIZATION, token.bearer_header());

        match self.send(request).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            data => decode(data),
        }
    }

    #[tracing::instrument(name = "HttpApiClient::update_status", skip(self, token))]
    async fn update_status(
        &self,
        token: &SessionToken,
        appointment_id: &AppointmentId,
        status: &AppointmentStatus,
    ) -> Result<(), ApiError> {
        let request_body = UpdateStatusRequest {
            appt_id: appointment_id,
            status,
        };
        let request = self
            .http_client
            .put(self.url(APPOINTMENT_PATH)?)
            .header(AUTHORIZATION, token.bearer_header())
            .json(&request_body);

        self.send(request).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(data: Option<Value>) -> Result<T, ApiError> {
    let data = data.ok_or_else(malformed)?;
    serde_json::from_value(data).map_err(|e| {
        tracing::warn!(error = %e, "Unreadable response payload");
        malformed()
    })
}

fn malformed() -> ApiError {
    ApiError::MalformedResponse(UNEXPECTED_RESPONSE_FORMAT.to_string())
}

fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network("Request timed out.".to_string())
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Trimmed and truncated. Blank input stays blank so callers fall back to
/// their own message.
fn sanitize_body(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dob: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct UpdateStatusRequest<'a> {
    appt_id: &'a AppointmentId,
    status: &'a AppointmentStatus,
}
