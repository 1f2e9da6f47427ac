//! Data layer for a property rental and investment catalogue: characteristic
//! extraction, view models, filtering, pagination, keyed fetch state and
//! favorites.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod sources;

pub use config::Config;
pub use error::{CatalogError, Result};
pub use sources::{CatalogSource, HttpCatalog, MockCatalog};
