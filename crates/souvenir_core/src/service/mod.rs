//! Catalog use-case services.
//!
//! # Responsibility
//! - Enforce catalog invariants above the store layer.
//! - Keep callers decoupled from snapshot storage details.

pub mod catalog_service;
