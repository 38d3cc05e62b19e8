use dentbook_core::{
    ApiError, AuthApi, Credentials, RegistrationPayload, Session, SessionStore,
    SessionStoreError, User,
};

pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Signup failed. Please try again.";

/// Error types for the auth client
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The remote API refused or could not be reached. `message` is what the
    /// form shows in its banner.
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
    #[error("Session store error: {0}")]
    Session(#[from] SessionStoreError),
    #[error("Authentication required. Please log in.")]
    Unauthenticated,
}

impl AuthError {
    fn api(source: ApiError, fallback: &str) -> Self {
        Self::Api {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Login, registration and logout against the remote API. The only writer of
/// the persisted session.
#[derive(Clone)]
pub struct AuthClient<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    api: A,
    session_store: S,
}

impl<A, S> AuthClient<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    pub fn new(api: A, session_store: S) -> Self {
        Self { api, session_store }
    }

    /// Authenticate and persist the resulting session.
    ///
    /// # Returns
    /// The signed-in user. On failure the previously stored session, if any,
    /// is left as it was.
    #[tracing::instrument(name = "AuthClient::login", skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let session = self
            .api
            .login(credentials)
            .await
            .map_err(|e| AuthError::api(e, LOGIN_FALLBACK_MESSAGE))?;

        self.persist(session).await
    }

    /// Create an account and sign it in, same contract as [`Self::login`].
    #[tracing::instrument(name = "AuthClient::register", skip_all)]
    pub async fn register(&self, payload: &RegistrationPayload) -> Result<User, AuthError> {
        let session = self
            .api
            .register(payload)
            .await
            .map_err(|e| AuthError::api(e, SIGNUP_FALLBACK_MESSAGE))?;

        self.persist(session).await
    }

    /// Drop the persisted session. Calling it without a session is a no-op.
    #[tracing::instrument(name = "AuthClient::logout", skip_all)]
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session_store.clear().await?;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session_store.get().await?)
    }

    pub async fn require_session(&self) -> Result<Session, AuthError> {
        require_session(&self.session_store).await
    }

    async fn persist(&self, session: Session) -> Result<User, AuthError> {
        let user = session.user().clone();
        self.session_store.set(session).await?;
        tracing::info!(user_id = %user.id, "Session stored");
        Ok(user)
    }
}

/// Session gate for protected screens. An unreadable session counts as absent.
pub async fn require_session<S>(session_store: &S) -> Result<Session, AuthError>
where
    S: SessionStore + ?Sized,
{
    match session_store.get().await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(AuthError::Unauthenticated),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable session");
            Err(AuthError::Unauthenticated)
        }
    }
}
