pub mod client;
pub mod query;

pub use client::{CatalogClient, CatalogError};
pub use query::DiscoverQuery;
