//! Request and response types for the auth endpoints. Requests carry
//! passwords and responses carry the session token, so none of them are ever
//! logged; their `Debug` output redacts the secrets.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Role attached to a session. Anything the server sends other than `ADMIN`
/// is treated as a standard user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[serde(other)]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => formatter.write_str("ADMIN"),
            Role::User => formatter.write_str("USER"),
        }
    }
}

/// Response of both login and register. It is also the persisted session
/// record: token, name, email and role are stored and cleared together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthResponse")
            .field("token", &"[REDACTED]")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

pub type StoredSession = AuthResponse;
