//! Catalog domain model.
//!
//! # Responsibility
//! - Define manufacturer/souvenir entities and the catalog aggregate.
//! - Keep every field rule inside constructors and setters.
//!
//! # Invariants
//! - Manufacturer names are unique catalog-wide.
//! - Souvenir names are unique within one manufacturer.
//! - Souvenirs never outlive their owning manufacturer.

pub mod catalog;
pub mod manufacturer;
pub mod souvenir;
pub mod validation;
