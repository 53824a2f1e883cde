use crate::{
    app_lib::validation::{check_email, check_text, Touched, Violation},
    features::auth::Session,
    routes::{AuthOutcome, Route},
};
use tracing::error;

const LOGIN_FAILED: &str = "Login failed. Please check your email and password.";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub const ALL: [LoginField; 2] = [LoginField::Email, LoginField::Password];
}

#[derive(Clone, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    touched: Touched<LoginField>,
}

impl LoginView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn violation(&self, field: LoginField) -> Option<Violation> {
        match field {
            LoginField::Email => check_email(&self.email),
            LoginField::Password => check_text(&self.password, Some(MIN_PASSWORD_LEN)),
        }
    }

    #[must_use]
    pub fn visible_error(&self, field: LoginField) -> Option<Violation> {
        if self.touched.is_touched(field) {
            self.violation(field)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        LoginField::ALL.iter().all(|f| self.violation(*f).is_none())
    }

    pub fn touch(&mut self, field: LoginField) {
        self.touched.touch(field);
    }

    #[must_use]
    pub fn is_touched(&self, field: LoginField) -> bool {
        self.touched.is_touched(field)
    }

    /// Logs in through `session`. Any failure shows the same fixed message.
    pub async fn submit(&mut self, session: &mut Session) -> AuthOutcome {
        if !self.is_valid() {
            self.touched.mark_all(&LoginField::ALL);
            return AuthOutcome::Invalid;
        }

        self.is_submitting = true;
        self.error_message = None;
        let result = session.login(&self.email, &self.password).await;
        self.is_submitting = false;

        match result {
            Ok(_) => AuthOutcome::Success(Route::Home),
            Err(err) => {
                error!("Login failed: {err}");
                self.error_message = Some(LOGIN_FAILED.to_string());
                AuthOutcome::Failed
            }
        }
    }
}
