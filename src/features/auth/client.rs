//! Client wrappers for the auth API endpoints. Both calls exchange
//! credentials for a session record and must never log the request body.

use crate::{
    app_lib::{AppError, ApiClient},
    features::auth::types::{AuthResponse, LoginRequest, RegisterRequest},
};
use tracing::instrument;

/// Creates an account and returns its session.
///
/// # Errors
/// Returns the `AppError` of the failed request.
#[instrument(skip_all)]
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
    let url = api.endpoint(&["api", "auth", "register"], &[])?;
    api.post_json(url, request).await
}

/// Exchanges email and password for a session.
///
/// # Errors
/// Returns the `AppError` of the failed request.
#[instrument(skip_all)]
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    let url = api.endpoint(&["api", "auth", "login"], &[])?;
    api.post_json(url, request).await
}
