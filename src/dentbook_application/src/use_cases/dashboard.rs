use dentbook_core::{
    ApiError, Appointment, AppointmentAction, AppointmentApi, AppointmentId, ProfileApi, Role,
    SessionStore, User,
};

use crate::use_cases::auth_client::{AuthError, require_session};

pub const DASHBOARD_FALLBACK_MESSAGE: &str = "Failed to load data.";
pub const ACTION_FALLBACK_MESSAGE: &str = "Action failed.";

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{}", .0.user_message(DASHBOARD_FALLBACK_MESSAGE))]
    Api(ApiError),
    #[error("{}", .0.user_message(ACTION_FALLBACK_MESSAGE))]
    Action(ApiError),
    #[error("This action is not available for this appointment.")]
    ActionNotAllowed,
    #[error("Appointment {0} not found")]
    NotFound(AppointmentId),
}

impl From<ApiError> for DashboardError {
    fn from(error: ApiError) -> Self {
        // An expired or revoked token is a sign-in problem, not a data one.
        if error.is_unauthorized() {
            Self::Auth(AuthError::Unauthenticated)
        } else {
            Self::Api(error)
        }
    }
}

impl DashboardError {
    fn from_action(error: ApiError) -> Self {
        match Self::from(error) {
            Self::Api(error) => Self::Action(error),
            other => other,
        }
    }
}

/// Profile plus appointment list of the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub user: User,
    pub appointments: Vec<Appointment>,
}

impl Dashboard {
    pub fn role(&self) -> Role {
        self.user.role()
    }

    /// Header of the column naming the other party.
    pub fn counterpart_heading(&self) -> &'static str {
        match self.role() {
            Role::Doctor => "Patient",
            Role::Patient => "Doctor",
        }
    }

    pub fn appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| &a.id == id)
    }
}

/// Loads the dashboard and applies complete/cancel actions.
pub struct DashboardUseCase<S, P, A>
where
    S: SessionStore,
    P: ProfileApi,
    A: AppointmentApi,
{
    session_store: S,
    profile_api: P,
    appointment_api: A,
}

impl<S, P, A> DashboardUseCase<S, P, A>
where
    S: SessionStore,
    P: ProfileApi,
    A: AppointmentApi,
{
    pub fn new(session_store: S, profile_api: P, appointment_api: A) -> Self {
        Self {
            session_store,
            profile_api,
            appointment_api,
        }
    }

    #[tracing::instrument(name = "DashboardUseCase::load", skip_all)]
    pub async fn load(&self) -> Result<Dashboard, DashboardError> {
        let session = require_session(&self.session_store).await?;
        let token = session.token();

        let (user, appointments) = tokio::try_join!(
            self.profile_api.current_user(token),
            self.appointment_api
                .list_appointments(token, &session.user().id),
        )?;

        tracing::debug!(
            user_id = %user.id,
            appointments = appointments.len(),
            "Dashboard loaded"
        );
        Ok(Dashboard { user, appointments })
    }

    pub async fn complete(
        &self,
        dashboard: &mut Dashboard,
        id: &AppointmentId,
    ) -> Result<(), DashboardError> {
        self.apply(dashboard, id, AppointmentAction::Complete).await
    }

    pub async fn cancel(
        &self,
        dashboard: &mut Dashboard,
        id: &AppointmentId,
    ) -> Result<(), DashboardError> {
        self.apply(dashboard, id, AppointmentAction::Cancel).await
    }

    /// Send the status change and mirror it into `dashboard` once the server
    /// accepts it. Only confirmed appointments can change.
    #[tracing::instrument(name = "DashboardUseCase::apply", skip(self, dashboard))]
    pub async fn apply(
        &self,
        dashboard: &mut Dashboard,
        id: &AppointmentId,
        action: AppointmentAction,
    ) -> Result<(), DashboardError> {
        let session = require_session(&self.session_store).await?;

        let role = dashboard.role();
        let appointment = dashboard
            .appointments
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| DashboardError::NotFound(id.clone()))?;

        if !appointment.is_actionable() || !action.allowed_for(role) {
            return Err(DashboardError::ActionNotAllowed);
        }

        let status = action.resulting_status();
        self.appointment_api
            .update_status(session.token(), id, &status)
            .await
            .map_err(DashboardError::from_action)?;

        tracing::info!(appointment_id = %id, status = %status, "Appointment updated");
        appointment.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::auth_client::tests::{MockSessionStore, session, user};
    use dentbook_core::{AppointmentStatus, SessionToken, UserId};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[derive(Clone)]
    struct MockProfileApi {
        user: User,
    }

    #[async_trait::async_trait]
    impl ProfileApi for MockProfileApi {
        async fn current_user(&self, token: &SessionToken) -> Result<User, ApiError> {
            if token == &SessionToken::parse("expired").unwrap() {
                return Err(ApiError::Rejected {
                    status: 401,
                    message: "Token expired".to_string(),
                });
            }
            Ok(self.user.clone())
        }
    }

    #[derive(Clone, Default)]
    struct MockAppointmentApi {
        appointments: Vec<Appointment>,
        updates: Arc<RwLock<Vec<(AppointmentId, AppointmentStatus)>>>,
        update_error: Option<ApiError>,
    }

    #[async_trait::async_trait]
    impl AppointmentApi for MockAppointmentApi {
        async fn list_appointments(
            &self,
            _token: &SessionToken,
            _user_id: &UserId,
        ) -> Result<Vec<Appointment>, ApiError> {
            Ok(self.appointments.clone())
        }

        async fn update_status(
            &self,
            _token: &SessionToken,
            appointment_id: &AppointmentId,
            status: &AppointmentStatus,
        ) -> Result<(), ApiError> {
            if let Some(error) = &self.update_error {
                return Err(error.clone());
            }
            self.updates
                .write()
                .await
                .push((appointment_id.clone(), status.clone()));
            Ok(())
        }
    }

    fn appointment(id: u64, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: AppointmentId::from(id),
            doctor_name: Some("Dr Jane Doe".to_string()),
            patient_name: Some("Test User".to_string()),
            date: "2025-10-01T00:00:00.000Z".to_string(),
            time: "09:00".to_string(),
            status,
        }
    }

    async fn signed_in_store(token: &str) -> MockSessionStore {
        let store = MockSessionStore::default();
        store.set(session(1, token)).await.unwrap();
        store
    }

    fn use_case(
        store: MockSessionStore,
        is_doctor: bool,
        appointments: MockAppointmentApi,
    ) -> DashboardUseCase<MockSessionStore, MockProfileApi, MockAppointmentApi> {
        let mut profile = user(1);
        profile.is_doctor = is_doctor;
        DashboardUseCase::new(store, MockProfileApi { user: profile }, appointments)
    }

    #[tokio::test]
    async fn test_load_requires_session() {
        let use_case = use_case(
            MockSessionStore::default(),
            false,
            MockAppointmentApi::default(),
        );

        let result = use_case.load().await;

        assert!(matches!(
            result,
            Err(DashboardError::Auth(AuthError::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn test_load_fetches_profile_and_appointments() {
        let api = MockAppointmentApi {
            appointments: vec![appointment(1, AppointmentStatus::Confirmed)],
            ..Default::default()
        };
        let use_case = use_case(signed_in_store("token-1").await, true, api);

        let dashboard = use_case.load().await.unwrap();

        assert_eq!(dashboard.role(), Role::Doctor);
        assert_eq!(dashboard.counterpart_heading(), "Patient");
        assert_eq!(dashboard.appointments.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_token_is_unauthenticated() {
        let use_case = use_case(
            signed_in_store("expired").await,
            false,
            MockAppointmentApi::default(),
        );

        let result = use_case.load().await;

        assert!(matches!(
            result,
            Err(DashboardError::Auth(AuthError::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn test_patient_cancels_confirmed_appointment() {
        let api = MockAppointmentApi {
            appointments: vec![appointment(7, AppointmentStatus::Confirmed)],
            ..Default::default()
        };
        let use_case = use_case(signed_in_store("token-1").await, false, api.clone());
        let mut dashboard = use_case.load().await.unwrap();
        let id = AppointmentId::from(7);

        use_case.cancel(&mut dashboard, &id).await.unwrap();

        assert_eq!(
            dashboard.appointment(&id).unwrap().status,
            AppointmentStatus::Cancelled
        );
        assert_eq!(
            *api.updates.read().await,
            vec![(id, AppointmentStatus::Cancelled)]
        );
    }

    #[tokio::test]
    async fn test_role_and_status_gate_actions() {
        let api = MockAppointmentApi {
            appointments: vec![
                appointment(1, AppointmentStatus::Confirmed),
                appointment(2, AppointmentStatus::Completed),
            ],
            ..Default::default()
        };
        let use_case = use_case(signed_in_store("token-1").await, false, api.clone());
        let mut dashboard = use_case.load().await.unwrap();

        let result = use_case.complete(&mut dashboard, &AppointmentId::from(1)).await;
        assert!(matches!(result, Err(DashboardError::ActionNotAllowed)));

        let result = use_case.cancel(&mut dashboard, &AppointmentId::from(2)).await;
        assert!(matches!(result, Err(DashboardError::ActionNotAllowed)));

        let result = use_case.cancel(&mut dashboard, &AppointmentId::from(99)).await;
        assert!(matches!(result, Err(DashboardError::NotFound(_))));

        assert!(api.updates.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_uses_action_fallback() {
        let api = MockAppointmentApi {
            appointments: vec![appointment(3, AppointmentStatus::Confirmed)],
            update_error: Some(ApiError::Network("connection reset".to_string())),
            ..Default::default()
        };
        let use_case = use_case(signed_in_store("token-1").await, true, api);
        let mut dashboard = use_case.load().await.unwrap();
        let id = AppointmentId::from(3);

        let error = use_case.complete(&mut dashboard, &id).await.unwrap_err();

        assert!(matches!(error, DashboardError::Action(_)));
        assert_eq!(error.to_string(), ACTION_FALLBACK_MESSAGE);
        assert_eq!(
            dashboard.appointment(&id).unwrap().status,
            AppointmentStatus::Confirmed
        );
    }
}
