//! Domain-level features (auth, products) and their shared logic. Routes
//! import these modules to keep view models focused while API handling and
//! session state stay in dedicated feature areas.
pub mod auth;
pub mod products;
