//! Manufacturer aggregate.
//!
//! # Responsibility
//! - Own an ordered list of souvenirs exclusively.
//! - Enforce souvenir-name uniqueness inside one manufacturer.
//!
//! # Invariants
//! - `name` and `country` are never blank.
//! - No two souvenirs of one manufacturer share a name.
//! - Souvenirs are only reachable through their owning manufacturer.

use super::souvenir::Souvenir;
use super::validation::{ensure_not_blank, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Catalog manufacturer with its owned souvenirs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    name: String,
    country: String,
    #[serde(default)]
    souvenirs: Vec<Souvenir>,
}

impl Manufacturer {
    /// Creates a manufacturer with an empty souvenir list.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            name: ensure_not_blank(name.into(), ModelValidationError::EmptyManufacturerName)?,
            country: ensure_not_blank(country.into(), ModelValidationError::EmptyCountry)?,
            souvenirs: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn souvenirs(&self) -> &[Souvenir] {
        &self.souvenirs
    }

    pub fn into_souvenirs(self) -> Vec<Souvenir> {
        self.souvenirs
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelValidationError> {
        self.name = ensure_not_blank(name.into(), ModelValidationError::EmptyManufacturerName)?;
        Ok(())
    }

    pub fn set_country(&mut self, country: impl Into<String>) -> Result<(), ModelValidationError> {
        self.country = ensure_not_blank(country.into(), ModelValidationError::EmptyCountry)?;
        Ok(())
    }

    /// Finds an owned souvenir by exact name.
    pub fn souvenir(&self, name: &str) -> Option<&Souvenir> {
        self.souvenirs.iter().find(|souvenir| souvenir.name() == name)
    }

    pub fn souvenir_mut(&mut self, name: &str) -> Option<&mut Souvenir> {
        self.souvenirs
            .iter_mut()
            .find(|souvenir| souvenir.name() == name)
    }

    pub fn has_souvenir(&self, name: &str) -> bool {
        self.souvenir(name).is_some()
    }

    /// Appends a souvenir, rejecting a name already owned by this manufacturer.
    pub fn add_souvenir(&mut self, souvenir: Souvenir) -> Result<(), ModelValidationError> {
        if self.has_souvenir(souvenir.name()) {
            return Err(self.duplicate_souvenir(souvenir.name()));
        }
        self.souvenirs.push(souvenir);
        Ok(())
    }

    /// Appends all souvenirs or none of them.
    ///
    /// Rejects the batch if any entry collides with an owned souvenir or with
    /// an earlier entry of the same batch.
    pub fn add_souvenirs(
        &mut self,
        souvenirs: Vec<Souvenir>,
    ) -> Result<(), ModelValidationError> {
        let mut batch_names = HashSet::new();
        for souvenir in &souvenirs {
            if self.has_souvenir(souvenir.name()) || !batch_names.insert(souvenir.name()) {
                return Err(self.duplicate_souvenir(souvenir.name()));
            }
        }
        self.souvenirs.extend(souvenirs);
        Ok(())
    }

    /// Renames one owned souvenir.
    ///
    /// Returns `Ok(false)` when `current` is not owned by this manufacturer.
    /// Renaming a souvenir to its own current name is accepted.
    pub fn rename_souvenir(
        &mut self,
        current: &str,
        new_name: impl Into<String>,
    ) -> Result<bool, ModelValidationError> {
        let new_name = ensure_not_blank(new_name.into(), ModelValidationError::EmptySouvenirName)?;
        if !self.has_souvenir(current) {
            return Ok(false);
        }
        let collides = self
            .souvenirs
            .iter()
            .any(|souvenir| souvenir.name() != current && souvenir.name() == new_name);
        if collides {
            return Err(self.duplicate_souvenir(&new_name));
        }
        if let Some(souvenir) = self.souvenir_mut(current) {
            souvenir.set_name(new_name)?;
        }
        Ok(true)
    }

    /// Lowest souvenir price, `None` when the manufacturer owns nothing.
    pub fn min_price(&self) -> Option<f64> {
        self.souvenirs
            .iter()
            .map(Souvenir::price)
            .min_by(|left, right| left.total_cmp(right))
    }

    /// Re-checks fields and souvenir-name uniqueness.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyManufacturerName);
        }
        if self.country.trim().is_empty() {
            return Err(ModelValidationError::EmptyCountry);
        }
        let mut seen = HashSet::new();
        for souvenir in &self.souvenirs {
            souvenir.validate()?;
            if !seen.insert(souvenir.name()) {
                return Err(self.duplicate_souvenir(souvenir.name()));
            }
        }
        Ok(())
    }

    fn duplicate_souvenir(&self, souvenir: &str) -> ModelValidationError {
        ModelValidationError::DuplicateSouvenirName {
            manufacturer: self.name.clone(),
            souvenir: souvenir.to_string(),
        }
    }
}

impl Display for Manufacturer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Manufacturer(name = {}, country = {}, souvenirs = {})",
            self.name,
            self.country,
            self.souvenirs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Manufacturer;
    use crate::model::souvenir::Souvenir;
    use crate::model::validation::ModelValidationError;

    fn souvenir(name: &str, price: f64) -> Souvenir {
        Souvenir::parse(name, "details", "15.06.2021", price).unwrap()
    }

    #[test]
    fn add_souvenirs_is_all_or_nothing() {
        let mut manufacturer = Manufacturer::new("Acme", "USA").unwrap();
        manufacturer.add_souvenir(souvenir("Mug", 9.99)).unwrap();

        let err = manufacturer
            .add_souvenirs(vec![souvenir("Cap", 5.0), souvenir("Cap", 6.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            ModelValidationError::DuplicateSouvenirName { ref souvenir, .. } if souvenir == "Cap"
        ));
        assert_eq!(manufacturer.souvenirs().len(), 1);

        manufacturer
            .add_souvenirs(vec![souvenir("Cap", 5.0), souvenir("Pen", 1.0)])
            .unwrap();
        assert_eq!(manufacturer.souvenirs().len(), 3);
        assert_eq!(manufacturer.min_price(), Some(1.0));
    }

    #[test]
    fn rename_souvenir_excludes_itself_from_collision_check() {
        let mut manufacturer = Manufacturer::new("Acme", "USA").unwrap();
        manufacturer.add_souvenir(souvenir("Mug", 9.99)).unwrap();
        manufacturer.add_souvenir(souvenir("Cap", 5.0)).unwrap();

        assert_eq!(manufacturer.rename_souvenir("Mug", "Mug"), Ok(true));
        assert!(manufacturer.rename_souvenir("Mug", "Cap").is_err());
        assert_eq!(manufacturer.rename_souvenir("Missing", "Other"), Ok(false));
        assert_eq!(manufacturer.rename_souvenir("Mug", "Cup"), Ok(true));
        assert!(manufacturer.has_souvenir("Cup"));
        assert!(!manufacturer.has_souvenir("Mug"));
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert_eq!(
            Manufacturer::new("", "USA").unwrap_err(),
            ModelValidationError::EmptyManufacturerName
        );
        assert_eq!(
            Manufacturer::new("Acme", " ").unwrap_err(),
            ModelValidationError::EmptyCountry
        );
    }
}
