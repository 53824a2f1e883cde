use crate::{
    app_lib::validation::{check_email, check_text, Touched, Violation},
    features::auth::Session,
    routes::{AuthOutcome, Route},
};
use tracing::error;

const REGISTER_FAILED: &str = "Registration failed. Email may already be in use.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

impl RegisterField {
    pub const ALL: [RegisterField; 3] = [
        RegisterField::Name,
        RegisterField::Email,
        RegisterField::Password,
    ];
}

#[derive(Clone, Default)]
pub struct RegisterView {
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    touched: Touched<RegisterField>,
}

impl RegisterView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn violation(&self, field: RegisterField) -> Option<Violation> {
        match field {
            RegisterField::Name => check_text(&self.name, Some(2)),
            RegisterField::Email => check_email(&self.email),
            RegisterField::Password => check_text(&self.password, Some(6)),
        }
    }

    #[must_use]
    pub fn visible_error(&self, field: RegisterField) -> Option<Violation> {
        self.touched
            .is_touched(field)
            .then(|| self.violation(field))
            .flatten()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        RegisterField::ALL.iter().all(|f| self.violation(*f).is_none())
    }

    pub fn touch(&mut self, field: RegisterField) {
        self.touched.touch(field);
    }

    #[must_use]
    pub fn is_touched(&self, field: RegisterField) -> bool {
        self.touched.is_touched(field)
    }

    pub async fn submit(&mut self, session: &mut Session) -> AuthOutcome {
        if !self.is_valid() {
            self.touched.mark_all(&RegisterField::ALL);
            return AuthOutcome::Invalid;
        }

        self.is_submitting = true;
        self.error_message = None;
        let result = session
            .register(&self.name, &self.email, &self.password)
            .await;
        self.is_submitting = false;

        match result {
            Ok(_) => AuthOutcome::Success(Route::Home),
            Err(err) => {
                error!("Registration failed: {err}");
                self.error_message = Some(REGISTER_FAILED.to_string());
                AuthOutcome::Failed
            }
        }
    }
}
