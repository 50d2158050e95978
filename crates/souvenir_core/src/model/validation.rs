//! Field-level validation rules shared by catalog entities.
//!
//! # Responsibility
//! - Define the validation error surfaced by entity constructors/setters.
//! - Parse and render the `dd.MM.yyyy` boundary date format.
//!
//! # Invariants
//! - Blank (empty or whitespace-only) names and countries are rejected.
//! - Prices must be finite and `>= 0`.
//! - Release date text must be exactly `dd.MM.yyyy` and a real calendar day.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Boundary text format for release dates (`dd.MM.yyyy`).
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

static RELEASE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid release date regex"));

/// Validation failure for manufacturer/souvenir fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    EmptyManufacturerName,
    EmptyCountry,
    EmptySouvenirName,
    /// Price is negative, NaN or infinite.
    InvalidPrice(f64),
    /// Text does not match `dd.MM.yyyy` or names a non-existent day.
    InvalidReleaseDate(String),
    /// Two manufacturers share one name inside a catalog.
    DuplicateManufacturerName(String),
    /// Two souvenirs of one manufacturer share a name.
    DuplicateSouvenirName {
        manufacturer: String,
        souvenir: String,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyManufacturerName => write!(f, "manufacturer name must not be empty"),
            Self::EmptyCountry => write!(f, "manufacturer country must not be empty"),
            Self::EmptySouvenirName => write!(f, "souvenir name must not be empty"),
            Self::InvalidPrice(price) => {
                write!(f, "souvenir price must be a non-negative number, got {price}")
            }
            Self::InvalidReleaseDate(text) => write!(
                f,
                "invalid release date `{text}`; expected format dd.MM.yyyy"
            ),
            Self::DuplicateManufacturerName(name) => {
                write!(f, "duplicate manufacturer name `{name}`")
            }
            Self::DuplicateSouvenirName {
                manufacturer,
                souvenir,
            } => write!(
                f,
                "duplicate souvenir name `{souvenir}` for manufacturer `{manufacturer}`"
            ),
        }
    }
}

impl Error for ModelValidationError {}

/// Parses `dd.MM.yyyy` text into a calendar date.
///
/// The whole text must be the two-digit day, two-digit month, four-digit
/// year layout; surrounding whitespace is rejected like any other deviation.
pub fn parse_release_date(text: &str) -> Result<NaiveDate, ModelValidationError> {
    if !RELEASE_DATE_RE.is_match(text) {
        return Err(ModelValidationError::InvalidReleaseDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, RELEASE_DATE_FORMAT)
        .map_err(|_| ModelValidationError::InvalidReleaseDate(text.to_string()))
}

/// Renders a date in the `dd.MM.yyyy` boundary format.
pub fn format_release_date(date: NaiveDate) -> String {
    date.format(RELEASE_DATE_FORMAT).to_string()
}

pub(crate) fn ensure_price(price: f64) -> Result<f64, ModelValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ModelValidationError::InvalidPrice(price))
    }
}

pub(crate) fn ensure_not_blank(
    value: String,
    error: ModelValidationError,
) -> Result<String, ModelValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(value)
    }
}
