pub mod auth_client;
pub mod auth_page;
pub mod dashboard;
pub mod doctor_directory;
pub mod login_form;
pub mod registration_form;
pub mod submission;

pub use auth_client::{
    AuthClient, AuthError, LOGIN_FALLBACK_MESSAGE, SIGNUP_FALLBACK_MESSAGE, require_session,
};
pub use auth_page::{AuthPage, AuthView};
pub use dashboard::{Dashboard, DashboardError, DashboardUseCase};
pub use doctor_directory::{ListDoctorsError, ListDoctorsUseCase};
pub use login_form::LoginFormController;
pub use registration_form::RegistrationFormController;
pub use submission::{FormPhase, SubmitOutcome};
