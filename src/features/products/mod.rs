//! Product catalog feature: API types and the catalog client.
pub mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{Category, ListParams, Page, Product, ProductPayload, DEFAULT_PAGE_SIZE};
