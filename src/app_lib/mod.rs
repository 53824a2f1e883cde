//! Shared client utilities for API access, configuration, errors, form
//! validation and build metadata.
//!
//! ## Core Flows
//!
//! ### Sign in
//!
//! 1. **Exchange:** The client POSTs credentials to `/api/auth/login` (or
//!    `/api/auth/register`) and receives `{token, name, email, role}`.
//! 2. **Persist:** The session context writes all four fields in one go.
//! 3. **Usage:** Catalog calls carry the token as `Authorization: Bearer`.
//!
//! ### Catalog administration
//!
//! Create, edit and delete are only reachable through admin-gated routes. The
//! guard is a UX check on the stored role; the API remains the authority.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Callers must avoid logging the
//! token or passwords.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;
pub mod validation;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::{AppError, FieldErrors};

/// Short commit hash, empty when the build had no git metadata.
#[must_use]
pub fn short_hash() -> &'static str {
    if GIT_COMMIT_HASH.len() > 7 {
        &GIT_COMMIT_HASH[0..7]
    } else {
        ""
    }
}

/// User agent sent with every request, e.g. `catalog/0.1.0 (1a2b3c4)`.
#[must_use]
pub fn user_agent() -> String {
    let base = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
    match short_hash() {
        "" => base.to_string(),
        hash => format!("{base} ({hash})"),
    }
}
