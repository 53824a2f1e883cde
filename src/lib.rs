//! # Catalog
//!
//! Client for a product catalog API: browse, search and filter paginated
//! products, and let administrators create, edit and delete them.
//!
//! ## Layout
//!
//! - [`app_lib`]: HTTP helpers, configuration, errors and build metadata.
//! - [`features`]: domain clients and the session context (auth, products).
//! - [`routes`]: one view model per screen plus the route table.
//! - [`app`]: the router that applies guards before building a view.
//! - [`cli`]: the `catalog` command line front end.

pub mod app;
pub mod app_lib;
pub mod cli;
pub mod features;
pub mod routes;
