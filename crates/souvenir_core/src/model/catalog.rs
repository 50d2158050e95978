//! Catalog aggregate root.
//!
//! # Responsibility
//! - Hold the ordered manufacturer sequence of one snapshot.
//! - Provide linear-scan lookups used by the service layer.
//!
//! # Invariants
//! - Manufacturer names are unique catalog-wide.
//! - Insertion order is preserved across every operation.

use super::manufacturer::Manufacturer;
use super::souvenir::Souvenir;
use super::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// In-memory snapshot of every manufacturer and its souvenirs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    manufacturers: Vec<Manufacturer>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manufacturers(&self) -> &[Manufacturer] {
        &self.manufacturers
    }

    pub fn into_manufacturers(self) -> Vec<Manufacturer> {
        self.manufacturers
    }

    pub fn len(&self) -> usize {
        self.manufacturers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }

    pub fn manufacturer(&self, name: &str) -> Option<&Manufacturer> {
        self.manufacturers
            .iter()
            .find(|manufacturer| manufacturer.name() == name)
    }

    pub fn manufacturer_mut(&mut self, name: &str) -> Option<&mut Manufacturer> {
        self.manufacturers
            .iter_mut()
            .find(|manufacturer| manufacturer.name() == name)
    }

    /// First manufacturer whose country equals `country` exactly.
    pub fn manufacturer_by_country_mut(&mut self, country: &str) -> Option<&mut Manufacturer> {
        self.manufacturers
            .iter_mut()
            .find(|manufacturer| manufacturer.country() == country)
    }

    pub fn contains_manufacturer(&self, name: &str) -> bool {
        self.manufacturer(name).is_some()
    }

    /// Appends a manufacturer, rejecting a name already in the catalog.
    pub fn add_manufacturer(
        &mut self,
        manufacturer: Manufacturer,
    ) -> Result<(), ModelValidationError> {
        if self.contains_manufacturer(manufacturer.name()) {
            return Err(ModelValidationError::DuplicateManufacturerName(
                manufacturer.name().to_string(),
            ));
        }
        self.manufacturers.push(manufacturer);
        Ok(())
    }

    /// Removes the named manufacturer together with its souvenirs.
    ///
    /// Returns the removed manufacturer, `None` when the name is unknown.
    pub fn remove_manufacturer(&mut self, name: &str) -> Option<Manufacturer> {
        let index = self
            .manufacturers
            .iter()
            .position(|manufacturer| manufacturer.name() == name)?;
        Some(self.manufacturers.remove(index))
    }

    /// Iterates every souvenir in catalog order.
    pub fn souvenirs(&self) -> impl Iterator<Item = &Souvenir> {
        self.manufacturers
            .iter()
            .flat_map(|manufacturer| manufacturer.souvenirs().iter())
    }

    pub fn souvenir_count(&self) -> usize {
        self.manufacturers
            .iter()
            .map(|manufacturer| manufacturer.souvenirs().len())
            .sum()
    }

    /// Re-checks every entity and both uniqueness invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        let mut names = HashSet::new();
        for manufacturer in &self.manufacturers {
            manufacturer.validate()?;
            if !names.insert(manufacturer.name()) {
                return Err(ModelValidationError::DuplicateManufacturerName(
                    manufacturer.name().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl From<Vec<Manufacturer>> for Catalog {
    fn from(manufacturers: Vec<Manufacturer>) -> Self {
        Self { manufacturers }
    }
}
