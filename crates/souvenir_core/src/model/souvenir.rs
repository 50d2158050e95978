//! Souvenir domain model.
//!
//! # Responsibility
//! - Define the leaf record owned by exactly one manufacturer.
//! - Validate every field on construction and on each setter call.
//!
//! # Invariants
//! - `name` is never blank.
//! - `price` is finite and non-negative.
//! - `release_date` carries no time component.

use super::validation::{
    ensure_not_blank, ensure_price, format_release_date, parse_release_date, ModelValidationError,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One souvenir item of a manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Souvenir {
    name: String,
    /// Free text, may be empty.
    manufacturer_details: String,
    release_date: NaiveDate,
    price: f64,
}

impl Souvenir {
    /// Creates a souvenir from already typed values.
    pub fn new(
        name: impl Into<String>,
        manufacturer_details: impl Into<String>,
        release_date: NaiveDate,
        price: f64,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            name: ensure_not_blank(name.into(), ModelValidationError::EmptySouvenirName)?,
            manufacturer_details: manufacturer_details.into(),
            release_date,
            price: ensure_price(price)?,
        })
    }

    /// Creates a souvenir from boundary text, with `release_date` as `dd.MM.yyyy`.
    pub fn parse(
        name: impl Into<String>,
        manufacturer_details: impl Into<String>,
        release_date: &str,
        price: f64,
    ) -> Result<Self, ModelValidationError> {
        let release_date = parse_release_date(release_date)?;
        Self::new(name, manufacturer_details, release_date, price)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manufacturer_details(&self) -> &str {
        &self.manufacturer_details
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    /// Calendar year of the release date.
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelValidationError> {
        self.name = ensure_not_blank(name.into(), ModelValidationError::EmptySouvenirName)?;
        Ok(())
    }

    pub fn set_manufacturer_details(&mut self, manufacturer_details: impl Into<String>) {
        self.manufacturer_details = manufacturer_details.into();
    }

    pub fn set_release_date(&mut self, release_date: NaiveDate) {
        self.release_date = release_date;
    }

    /// Sets the release date from `dd.MM.yyyy` text; leaves it unchanged on error.
    pub fn set_release_date_text(&mut self, text: &str) -> Result<(), ModelValidationError> {
        self.release_date = parse_release_date(text)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), ModelValidationError> {
        self.price = ensure_price(price)?;
        Ok(())
    }

    /// Re-checks field rules, used on values that bypassed constructors (decode).
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptySouvenirName);
        }
        ensure_price(self.price)?;
        Ok(())
    }
}

impl Display for Souvenir {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Souvenir(name = {}, manufacturer_details = {}, release_date = {}, price = {:.2})",
            self.name,
            self.manufacturer_details,
            format_release_date(self.release_date),
            self.price
        )
    }
}
