use crate::{features::auth::state::Session, routes::Route};
use tracing::debug;

/// Outcome of a guard check for one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Admits only admin sessions. Evaluated on every navigation; the result is
/// never cached. UX-only guard; real access control must live on the API.
#[must_use]
pub fn require_admin(session: &Session) -> GuardDecision {
    if session.is_admin() {
        GuardDecision::Allow
    } else if session.is_logged_in() {
        debug!("admin route denied for standard user");
        GuardDecision::Redirect(Route::Home)
    } else {
        debug!("admin route denied for anonymous user");
        GuardDecision::Redirect(Route::Login)
    }
}
