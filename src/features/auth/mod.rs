//! Auth feature covering login/register exchanges, the persisted session
//! context and the admin route guard. It touches the session token and user
//! passwords and must never log either.
//!
//! Flow Overview: login and register POST credentials and receive
//! `{token, name, email, role}`; the session context persists the record in
//! one write. Logout removes the record and sends the user to `/login`.
pub mod client;
pub mod guards;
pub mod state;
pub mod storage;
pub mod types;

pub use guards::{require_admin, GuardDecision};
pub use state::Session;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use types::{AuthResponse, Role};
