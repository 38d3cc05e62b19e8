use std::sync::atomic::AtomicBool;

use chrono::NaiveDate;
use dentbook_core::{
    AuthApi, ErrorField, FieldErrorKind, FormField, Password, PasswordRequirementReport,
    PhoneNumberValidator, RegionCode, RegionDetector, RegistrationInput, SessionStore, User,
    ValidationErrors, validate_date_of_birth, validate_email, validate_name,
    validate_password_confirmation, validate_phone,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use crate::use_cases::{
    auth_client::AuthClient,
    submission::{FormPhase, InFlight, SubmitOutcome, observed_phase},
};

#[derive(Debug, Default)]
struct RegistrationState {
    input: RegistrationInput,
    errors: ValidationErrors,
    report: PasswordRequirementReport,
    phase: FormPhase,
    region: RegionCode,
}

/// Drives the signup form: per-field validation on blur, live password
/// checklist, and a single in-flight register call per submit.
pub struct RegistrationFormController<A, S, P>
where
    A: AuthApi,
    S: SessionStore,
    P: PhoneNumberValidator,
{
    auth_client: AuthClient<A, S>,
    phone_validator: P,
    state: RwLock<RegistrationState>,
    in_flight: AtomicBool,
}

impl<A, S, P> RegistrationFormController<A, S, P>
where
    A: AuthApi,
    S: SessionStore,
    P: PhoneNumberValidator,
{
    pub fn new(auth_client: AuthClient<A, S>, phone_validator: P) -> Self {
        Self {
            auth_client,
            phone_validator,
            state: RwLock::new(RegistrationState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Ask `detector` for the phone region. The form keeps working with the
    /// default region until this resolves.
    pub async fn detect_region<R>(&self, detector: &R) -> RegionCode
    where
        R: RegionDetector + ?Sized,
    {
        let region = detector.detect().await;
        tracing::debug!(region = %region, "Phone region detected");
        self.state.write().await.region = region.clone();
        region
    }

    pub async fn set_region(&self, region: RegionCode) {
        self.state.write().await.region = region;
    }

    /// Update one input. Password edits refresh the requirement checklist.
    pub async fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let mut state = self.state.write().await;
        let input = &mut state.input;
        match field {
            FormField::FirstName => input.first_name = value,
            FormField::LastName => input.last_name = value,
            FormField::DateOfBirth => input.date_of_birth = value,
            FormField::Phone => input.phone = value,
            FormField::Email => input.email = value,
            FormField::Password => input.password = Password::new(value),
            FormField::ConfirmPassword => input.confirm_password = Password::new(value),
        }
        if field == FormField::Password {
            state.report = state.input.password.report();
        }
        state.phase = FormPhase::Editing;
    }

    /// Validate only `field`. Returns whether it is currently valid.
    pub async fn blur(&self, field: FormField) -> bool {
        let mut state = self.state.write().await;
        let RegistrationState {
            input,
            errors,
            report,
            region,
            ..
        } = &mut *state;

        let checked = match field {
            FormField::FirstName | FormField::LastName => validate_names(input),
            FormField::DateOfBirth => validate_date_of_birth(&input.date_of_birth, today()),
            FormField::Phone => validate_phone(&input.phone, region, &self.phone_validator),
            FormField::Email => validate_email(&input.email),
            FormField::Password if input.password.is_empty() => return true,
            FormField::Password => strength(report),
            FormField::ConfirmPassword => validate_password_confirmation(
                input.password.as_ref().expose_secret(),
                input.confirm_password.as_ref().expose_secret(),
            ),
        };
        errors.record(field.error_field(), checked)
    }

    /// Validate everything and, if clean, register.
    ///
    /// A mismatched confirmation clears both password inputs. Nothing is
    /// sent unless every field passes, and a submit made while another is in
    /// flight returns [`SubmitOutcome::Ignored`].
    #[tracing::instrument(name = "RegistrationFormController::submit", skip_all)]
    pub async fn submit(&self) -> SubmitOutcome<User> {
        let Some(in_flight) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("Registration already in flight");
            return SubmitOutcome::Ignored;
        };

        let payload = {
            let mut state = self.state.write().await;
            state.phase = FormPhase::Validating;
            state.errors.clear(ErrorField::Api);

            state.phase = FormPhase::Editing;
            if !self.validate_all(&mut state) {
                drop(in_flight);
                return SubmitOutcome::Invalid(state.errors.clone());
            }

            state.input.sanitize()
        };

        let result = self.auth_client.register(&payload).await;

        let mut state = self.state.write().await;
        match result {
            Ok(user) => {
                let region = state.region.clone();
                *state = RegistrationState {
                    phase: FormPhase::Success,
                    region,
                    ..Default::default()
                };
                SubmitOutcome::Completed(user)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(error = %e, "Registration rejected");
                state.errors.set(ErrorField::Api, message.clone());
                state.phase = FormPhase::Rejected;
                SubmitOutcome::Rejected(message)
            }
        }
    }

    fn validate_all(&self, state: &mut RegistrationState) -> bool {
        let RegistrationState {
            input,
            errors,
            report,
            region,
            ..
        } = state;

        // Evaluate every field so all messages show at once.
        let checks = [
            errors.record(ErrorField::Name, validate_names(input)),
            errors.record(
                ErrorField::Dob,
                validate_date_of_birth(&input.date_of_birth, today()),
            ),
            errors.record(
                ErrorField::Phone,
                validate_phone(&input.phone, region, &self.phone_validator),
            ),
            errors.record(ErrorField::Email, validate_email(&input.email)),
            errors.record(ErrorField::Password, strength(report)),
        ];

        let confirmed = errors.record(
            ErrorField::Confirm,
            validate_password_confirmation(
                input.password.as_ref().expose_secret(),
                input.confirm_password.as_ref().expose_secret(),
            ),
        );
        if !confirmed {
            input.clear_passwords();
            *report = input.password.report();
        }

        confirmed && checks.iter().all(|passed| *passed)
    }

    pub async fn errors(&self) -> ValidationErrors {
        self.state.read().await.errors.clone()
    }

    pub async fn phase(&self) -> FormPhase {
        observed_phase(self.state.read().await.phase, &self.in_flight)
    }

    pub async fn password_report(&self) -> PasswordRequirementReport {
        self.state.read().await.report
    }

    pub async fn region(&self) -> RegionCode {
        self.state.read().await.region.clone()
    }

    pub async fn input(&self) -> RegistrationInput {
        self.state.read().await.input.clone()
    }
}

fn validate_names(input: &RegistrationInput) -> Result<(), FieldErrorKind> {
    validate_name(&input.first_name).and_then(|_| validate_name(&input.last_name))
}

fn strength(report: &PasswordRequirementReport) -> Result<(), FieldErrorKind> {
    if report.is_acceptable() {
        Ok(())
    } else {
        Err(FieldErrorKind::WeakPassword)
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::auth_client::tests::{MockAuthApi, MockSessionStore};
    use std::{
        sync::{Arc, atomic::Ordering},
        time::Duration,
    };
    use tokio::sync::Notify;

    /// Numbers of ten or more digits are valid in every region but `ZZ`.
    struct DigitCountValidator;

    impl PhoneNumberValidator for DigitCountValidator {
        fn is_valid(&self, number: &str, region: &RegionCode) -> bool {
            region.as_str() != "ZZ" && number.chars().filter(char::is_ascii_digit).count() >= 10
        }
    }

    struct FixedRegion(&'static str);

    #[async_trait::async_trait]
    impl RegionDetector for FixedRegion {
        async fn detect(&self) -> RegionCode {
            RegionCode::parse(self.0).unwrap_or_default()
        }
    }

    type Controller = RegistrationFormController<MockAuthApi, MockSessionStore, DigitCountValidator>;

    fn controller(api: MockAuthApi, store: MockSessionStore) -> Controller {
        RegistrationFormController::new(AuthClient::new(api, store), DigitCountValidator)
    }

    async fn fill_valid(form: &Controller) {
        form.set_field(FormField::FirstName, "Ada").await;
        form.set_field(FormField::LastName, "Lovelace").await;
        form.set_field(FormField::DateOfBirth, "1990-04-12").await;
        form.set_field(FormField::Phone, "+1 415 555 2671").await;
        form.set_field(FormField::Email, "ada@example.com").await;
        form.set_field(FormField::Password, "Password123!").await;
        form.set_field(FormField::ConfirmPassword, "Password123!").await;
    }

    #[tokio::test]
    async fn test_valid_submit_registers_and_resets() {
        let api = MockAuthApi::default();
        let store = MockSessionStore::default();
        let form = controller(api.clone(), store.clone());
        fill_valid(&form).await;

        let outcome = form.submit().await;

        match outcome {
            SubmitOutcome::Completed(user) => assert_eq!(user.email, "ada@example.com"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(api.register_calls.load(Ordering::SeqCst), 1);
        assert_eq!(form.phase().await, FormPhase::Success);
        assert_eq!(form.input().await, RegistrationInput::default());
        assert!(store.get().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mismatched_passwords_clear_both_and_skip_network() {
        let api = MockAuthApi::default();
        let form = controller(api.clone(), MockSessionStore::default());
        fill_valid(&form).await;
        form.set_field(FormField::ConfirmPassword, "Password123?").await;

        let outcome = form.submit().await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.message(ErrorField::Confirm), "Passwords do not match.");
        let input = form.input().await;
        assert!(input.password.is_empty());
        assert!(input.confirm_password.is_empty());
        assert!(!form.password_report().await.is_acceptable());
        assert_eq!(api.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_invalid_fields_are_reported_together() {
        let api = MockAuthApi::default();
        let form = controller(api.clone(), MockSessionStore::default());
        form.set_field(FormField::FirstName, "Ada1").await;
        form.set_field(FormField::DateOfBirth, "2999-01-01").await;
        form.set_field(FormField::Phone, "123").await;
        form.set_field(FormField::Email, "not-an-email").await;
        form.set_field(FormField::Password, "weak").await;
        form.set_field(FormField::ConfirmPassword, "weak").await;

        let SubmitOutcome::Invalid(errors) = form.submit().await else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.message(ErrorField::Name), "Must consist of letters only");
        assert_eq!(errors.message(ErrorField::Dob), "Please enter a valid date of birth.");
        assert_eq!(errors.message(ErrorField::Phone), "Please enter a valid phone number.");
        assert_eq!(errors.message(ErrorField::Email), "Email is invalid");
        assert_eq!(
            errors.message(ErrorField::Password),
            "Password does not meet all requirements."
        );
        assert!(!errors.contains(ErrorField::Confirm));
        assert_eq!(form.phase().await, FormPhase::Editing);
        assert_eq!(api.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_submits_send_one_request() {
        let gate = Arc::new(Notify::new());
        let api = MockAuthApi {
            register_gate: Some(gate.clone()),
            ..Default::default()
        };
        let form = controller(api.clone(), MockSessionStore::default());
        fill_valid(&form).await;

        let (first, second) = tokio::join!(form.submit(), async {
            tokio::task::yield_now().await;
            let outcome = form.submit().await;
            gate.notify_one();
            outcome
        });

        assert!(first.is_completed());
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(api.register_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_abandoned_submit_returns_form_to_editing() {
        let gate = Arc::new(Notify::new());
        let api = MockAuthApi {
            register_gate: Some(gate.clone()),
            ..Default::default()
        };
        let form = controller(api.clone(), MockSessionStore::default());
        fill_valid(&form).await;

        {
            let submit = form.submit();
            tokio::pin!(submit);
            let pending = tokio::time::timeout(Duration::from_millis(20), &mut submit).await;
            assert!(pending.is_err());
            assert_eq!(form.phase().await, FormPhase::Submitting);
        }

        assert_eq!(form.phase().await, FormPhase::Editing);
        form.set_field(FormField::Email, "grace@example.com").await;
        assert_eq!(form.phase().await, FormPhase::Editing);

        gate.notify_one();
        assert!(form.submit().await.is_completed());
        assert_eq!(api.register_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_server_rejection_sets_banner() {
        let api = MockAuthApi {
            register_error: Some(dentbook_core::ApiError::Rejected {
                status: 409,
                message: "Email already registered.".to_string(),
            }),
            ..Default::default()
        };
        let form = controller(api, MockSessionStore::default());
        fill_valid(&form).await;

        let outcome = form.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected("Email already registered.".to_string())
        );
        assert_eq!(form.phase().await, FormPhase::Rejected);
        assert_eq!(
            form.errors().await.message(ErrorField::Api),
            "Email already registered."
        );
        assert_eq!(form.input().await.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_blur_validates_single_field() {
        let form = controller(MockAuthApi::default(), MockSessionStore::default());
        form.set_field(FormField::Email, "bad").await;
        form.set_field(FormField::Phone, "123").await;

        assert!(!form.blur(FormField::Email).await);
        let errors = form.errors().await;
        assert!(errors.contains(ErrorField::Email));
        assert!(!errors.contains(ErrorField::Phone));

        form.set_field(FormField::Email, "ok@example.com").await;
        assert!(form.blur(FormField::Email).await);
        assert!(form.errors().await.is_empty());
    }

    #[tokio::test]
    async fn test_password_checklist_tracks_edits() {
        let form = controller(MockAuthApi::default(), MockSessionStore::default());

        form.set_field(FormField::Password, "abc").await;
        let report = form.password_report().await;
        assert!(report.lower && !report.upper && !report.length);

        form.set_field(FormField::Password, "Abcdefg1!").await;
        assert!(form.password_report().await.is_acceptable());
    }

    #[tokio::test]
    async fn test_detected_region_drives_phone_validation() {
        let form = controller(MockAuthApi::default(), MockSessionStore::default());
        assert_eq!(form.region().await.as_str(), "US");
        form.set_field(FormField::Phone, "+1 415 555 2671").await;
        assert!(form.blur(FormField::Phone).await);

        let region = form.detect_region(&FixedRegion("zz")).await;
        assert_eq!(region.as_str(), "ZZ");
        assert!(!form.blur(FormField::Phone).await);
    }
}
