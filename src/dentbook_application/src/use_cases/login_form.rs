use std::sync::atomic::AtomicBool;

use dentbook_core::{
    AuthApi, Credentials, ErrorField, FieldErrorKind, Password, SessionStore, User,
    ValidationErrors, validate_email,
};
use tokio::sync::RwLock;

use crate::use_cases::{
    auth_client::AuthClient,
    submission::{FormPhase, InFlight, SubmitOutcome, observed_phase},
};

#[derive(Debug, Default)]
struct LoginState {
    email: String,
    password: Password,
    errors: ValidationErrors,
    phase: FormPhase,
}

/// Drives the login form. Same single-flight rule as registration.
pub struct LoginFormController<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    auth_client: AuthClient<A, S>,
    state: RwLock<LoginState>,
    in_flight: AtomicBool,
}

impl<A, S> LoginFormController<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    pub fn new(auth_client: AuthClient<A, S>) -> Self {
        Self {
            auth_client,
            state: RwLock::new(LoginState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn set_email(&self, email: impl Into<String>) {
        let mut state = self.state.write().await;
        state.email = email.into();
        state.phase = FormPhase::Editing;
    }

    pub async fn set_password(&self, password: Password) {
        let mut state = self.state.write().await;
        state.password = password;
        state.phase = FormPhase::Editing;
    }

    pub async fn blur_email(&self) -> bool {
        let mut state = self.state.write().await;
        let checked = validate_email(state.email.trim());
        state.errors.record(ErrorField::Email, checked)
    }

    #[tracing::instrument(name = "LoginFormController::submit", skip_all)]
    pub async fn submit(&self) -> SubmitOutcome<User> {
        let Some(in_flight) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("Login already in flight");
            return SubmitOutcome::Ignored;
        };

        let credentials = {
            let mut state = self.state.write().await;
            state.phase = FormPhase::Validating;
            state.errors.clear_all();

            let email = state.email.trim().to_string();
            let checked = if email.is_empty() {
                Err(FieldErrorKind::EmailRequired)
            } else {
                validate_email(&email)
            };
            state.phase = FormPhase::Editing;
            if !state.errors.record(ErrorField::Email, checked) {
                drop(in_flight);
                return SubmitOutcome::Invalid(state.errors.clone());
            }

            Credentials::new(email, state.password.clone())
        };

        let result = self.auth_client.login(&credentials).await;

        let mut state = self.state.write().await;
        match result {
            Ok(user) => {
                state.password = Password::empty();
                state.phase = FormPhase::Success;
                SubmitOutcome::Completed(user)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(error = %e, "Login rejected");
                state.errors.set(ErrorField::Api, message.clone());
                state.phase = FormPhase::Rejected;
                SubmitOutcome::Rejected(message)
            }
        }
    }

    pub async fn errors(&self) -> ValidationErrors {
        self.state.read().await.errors.clone()
    }

    pub async fn phase(&self) -> FormPhase {
        observed_phase(self.state.read().await.phase, &self.in_flight)
    }
}
