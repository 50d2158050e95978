//! Catalog persistence layer.
//!
//! # Responsibility
//! - Store and restore the full catalog as one unit.
//! - Keep file format and I/O details away from the service layer.
//!
//! # Invariants
//! - Every backend replaces the whole snapshot on save.
//! - Load failures are absorbed into an empty catalog, never raised.

pub mod catalog_store;
pub mod file_store;
pub mod memory_store;
