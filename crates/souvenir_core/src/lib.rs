//! Core domain logic for the souvenir catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::Catalog;
pub use model::manufacturer::Manufacturer;
pub use model::souvenir::Souvenir;
pub use model::validation::{
    format_release_date, parse_release_date, ModelValidationError, RELEASE_DATE_FORMAT,
};
pub use repo::catalog_store::{CatalogStore, StoreError, StoreResult, CATALOG_FORMAT_VERSION};
pub use repo::file_store::{FileCatalogStore, DEFAULT_CATALOG_FILE_NAME};
pub use repo::memory_store::InMemoryCatalogStore;
pub use service::catalog_service::{CatalogService, CatalogServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
