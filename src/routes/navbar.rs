use crate::{app_lib::AppError, features::auth::Session, routes::Route};

/// Session summary shown in the navigation bar. A snapshot: call
/// `check_auth` after anything that changes the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navbar {
    pub is_logged_in: bool,
    pub is_admin: bool,
    pub user_name: String,
}

impl Navbar {
    #[must_use]
    pub fn init(session: &Session) -> Self {
        let mut navbar = Self::default();
        navbar.check_auth(session);
        navbar
    }

    pub fn check_auth(&mut self, session: &Session) {
        self.is_logged_in = session.is_logged_in();
        self.is_admin = session.is_admin();
        self.user_name = session.user_name().unwrap_or_default().to_string();
    }

    /// # Errors
    /// Returns the storage error from `Session::logout`; local state is reset
    /// either way.
    pub fn logout(&mut self, session: &mut Session) -> Result<Route, AppError> {
        let result = session.logout();
        *self = Self::default();
        result
    }
}
