//! Session context for the client. It is the only owner of the session
//! storage: views and guards read through its accessors and change it only
//! through `login`, `register` and `logout`. Only the token is sensitive; it
//! is handed out as a `SecretString`.

use crate::{
    app_lib::{AppError, ApiClient},
    features::auth::{
        client,
        storage::SessionStorage,
        types::{AuthResponse, LoginRequest, RegisterRequest, Role, StoredSession},
    },
    routes::Route,
};
use secrecy::SecretString;
use tracing::{info, instrument, warn};

pub struct Session {
    api: ApiClient,
    storage: Box<dyn SessionStorage>,
    current: Option<StoredSession>,
}

impl Session {
    /// Opens the session persisted in `storage`. An unreadable record is
    /// treated as logged out.
    pub fn new(api: ApiClient, storage: impl SessionStorage + 'static) -> Self {
        let current = match storage.load() {
            Ok(current) => current,
            Err(err) => {
                warn!("Ignoring stored session: {err}");
                None
            }
        };

        Self {
            api,
            storage: Box::new(storage),
            current,
        }
    }

    /// Registers a new account and stores the returned session.
    ///
    /// # Errors
    /// Request and storage failures are returned unchanged.
    #[instrument(skip(self, password))]
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = client::register(&self.api, &request).await?;
        self.store(&response)?;
        Ok(response)
    }

    /// Logs in and stores the returned session.
    ///
    /// # Errors
    /// Request and storage failures are returned unchanged.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = client::login(&self.api, &request).await?;
        self.store(&response)?;
        Ok(response)
    }

    fn store(&mut self, response: &AuthResponse) -> Result<(), AppError> {
        self.storage.save(response)?;
        self.current = Some(response.clone());
        info!(role = %response.role, "session stored");
        Ok(())
    }

    /// Clears every session field and returns the route to show next.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the persisted record cannot be removed;
    /// the in-memory session is cleared regardless.
    pub fn logout(&mut self) -> Result<Route, AppError> {
        self.current = None;
        self.storage.clear()?;
        info!("session cleared");
        Ok(Route::Login)
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|session| !session.token.is_empty())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.current
            .as_ref()
            .filter(|session| !session.token.is_empty())
            .map(|session| SecretString::from(session.token.clone()))
    }

    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.name.as_str())
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.email.as_str())
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|session| session.role)
    }

    /// API client carrying the session token, if any.
    #[must_use]
    pub fn authorized_api(&self) -> ApiClient {
        self.api.with_bearer(self.token())
    }
}
