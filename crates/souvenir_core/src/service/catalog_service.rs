//! Catalog use-case service.
//!
//! # Responsibility
//! - Run every mutation as one load-validate-mutate-save cycle.
//! - Answer lookups and filters over a freshly loaded snapshot.
//!
//! # Invariants
//! - Validation happens before any write; a rejected call never saves.
//! - Queries never write.
//! - Snapshots are owned by one call and dropped when it returns.
//! - Country and name matching is exact and case-sensitive.

use crate::model::catalog::Catalog;
use crate::model::manufacturer::Manufacturer;
use crate::model::souvenir::Souvenir;
use crate::model::validation::{parse_release_date, ModelValidationError};
use crate::repo::catalog_store::{CatalogStore, StoreError};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, CatalogServiceError>;

/// Outcome of a rejected or failed catalog operation.
#[derive(Debug)]
pub enum CatalogServiceError {
    /// Field rule violated (blank name/country, bad price, bad date).
    Validation(ModelValidationError),
    ManufacturerNotFound(String),
    /// No manufacturer is located in the given country.
    CountryNotFound(String),
    SouvenirNotFound {
        manufacturer: String,
        souvenir: String,
    },
    DuplicateManufacturer(String),
    DuplicateSouvenir {
        manufacturer: String,
        souvenir: String,
    },
    /// Snapshot write failed after validation succeeded.
    Storage(StoreError),
}

impl CatalogServiceError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::ManufacturerNotFound(_) => "manufacturer_not_found",
            Self::CountryNotFound(_) => "country_not_found",
            Self::SouvenirNotFound { .. } => "souvenir_not_found",
            Self::DuplicateManufacturer(_) => "duplicate_manufacturer",
            Self::DuplicateSouvenir { .. } => "duplicate_souvenir",
            Self::Storage(_) => "storage_failed",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ManufacturerNotFound(_)
                | Self::CountryNotFound(_)
                | Self::SouvenirNotFound { .. }
        )
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateManufacturer(_) | Self::DuplicateSouvenir { .. }
        )
    }
}

impl Display for CatalogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ManufacturerNotFound(name) => write!(f, "manufacturer not found: `{name}`"),
            Self::CountryNotFound(country) => {
                write!(f, "no manufacturer located in country `{country}`")
            }
            Self::SouvenirNotFound {
                manufacturer,
                souvenir,
            } => write!(
                f,
                "souvenir `{souvenir}` not found for manufacturer `{manufacturer}`"
            ),
            Self::DuplicateManufacturer(name) => {
                write!(f, "manufacturer with name `{name}` already exists")
            }
            Self::DuplicateSouvenir {
                manufacturer,
                souvenir,
            } => write!(
                f,
                "manufacturer `{manufacturer}` already has souvenir `{souvenir}`"
            ),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for CatalogServiceError {
    fn from(value: ModelValidationError) -> Self {
        match value {
            ModelValidationError::DuplicateManufacturerName(name) => {
                Self::DuplicateManufacturer(name)
            }
            ModelValidationError::DuplicateSouvenirName {
                manufacturer,
                souvenir,
            } => Self::DuplicateSouvenir {
                manufacturer,
                souvenir,
            },
            other => Self::Validation(other),
        }
    }
}

impl From<StoreError> for CatalogServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Catalog service facade over a store implementation.
pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Creates a service using the provided store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Adds a manufacturer with an empty souvenir list.
    pub fn add_manufacturer(
        &self,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> ServiceResult<Manufacturer> {
        let manufacturer = Manufacturer::new(name, country)?;
        self.mutate("manufacturer_add", |catalog| {
            catalog.add_manufacturer(manufacturer.clone())?;
            Ok(manufacturer)
        })
    }

    /// Appends one souvenir to an existing manufacturer.
    pub fn add_souvenir(
        &self,
        manufacturer_name: &str,
        souvenir: Souvenir,
    ) -> ServiceResult<Souvenir> {
        self.mutate("souvenir_add", |catalog| {
            let manufacturer = manufacturer_mut(catalog, manufacturer_name)?;
            manufacturer.add_souvenir(souvenir.clone())?;
            Ok(souvenir)
        })
    }

    /// Appends a batch of souvenirs; any collision rejects the whole batch.
    ///
    /// Returns the number of souvenirs added.
    pub fn add_souvenirs(
        &self,
        manufacturer_name: &str,
        souvenirs: Vec<Souvenir>,
    ) -> ServiceResult<usize> {
        self.mutate("souvenir_add_batch", |catalog| {
            let manufacturer = manufacturer_mut(catalog, manufacturer_name)?;
            let count = souvenirs.len();
            manufacturer.add_souvenirs(souvenirs)?;
            Ok(count)
        })
    }

    pub fn find_manufacturer_by_name(&self, name: &str) -> ServiceResult<Manufacturer> {
        self.store
            .load()
            .into_manufacturers()
            .into_iter()
            .find(|manufacturer| manufacturer.name() == name)
            .ok_or_else(|| CatalogServiceError::ManufacturerNotFound(name.to_string()))
    }

    pub fn find_souvenir(
        &self,
        manufacturer_name: &str,
        souvenir_name: &str,
    ) -> ServiceResult<Souvenir> {
        let catalog = self.store.load();
        catalog
            .manufacturer(manufacturer_name)
            .and_then(|manufacturer| manufacturer.souvenir(souvenir_name))
            .cloned()
            .ok_or_else(|| CatalogServiceError::SouvenirNotFound {
                manufacturer: manufacturer_name.to_string(),
                souvenir: souvenir_name.to_string(),
            })
    }

    /// Souvenirs of the named manufacturer; empty when it does not exist.
    pub fn find_souvenirs_by_manufacturer_name(&self, name: &str) -> Vec<Souvenir> {
        self.store
            .load()
            .into_manufacturers()
            .into_iter()
            .find(|manufacturer| manufacturer.name() == name)
            .map(Manufacturer::into_souvenirs)
            .unwrap_or_default()
    }

    /// Souvenirs of every manufacturer located in `country`, in catalog order.
    pub fn find_souvenirs_by_manufacturer_country(&self, country: &str) -> Vec<Souvenir> {
        self.store
            .load()
            .into_manufacturers()
            .into_iter()
            .filter(|manufacturer| manufacturer.country() == country)
            .flat_map(Manufacturer::into_souvenirs)
            .collect()
    }

    /// Souvenirs priced strictly below `limit`, catalog-wide.
    pub fn find_souvenirs_by_price_lower_than(&self, limit: f64) -> Vec<Souvenir> {
        self.collect_souvenirs(|souvenir| souvenir.price() < limit)
    }

    /// Manufacturers owning at least one souvenir priced strictly below `limit`.
    pub fn find_manufacturers_by_price_lower_than(&self, limit: f64) -> Vec<Manufacturer> {
        self.collect_manufacturers(|manufacturer| {
            manufacturer
                .min_price()
                .is_some_and(|min_price| min_price < limit)
        })
    }

    /// Manufacturers owning a souvenir named `souvenir_name` released in `year`.
    pub fn find_manufacturers_by_souvenir_and_release_date(
        &self,
        souvenir_name: &str,
        year: i32,
    ) -> Vec<Manufacturer> {
        self.collect_manufacturers(|manufacturer| {
            manufacturer
                .souvenir(souvenir_name)
                .is_some_and(|souvenir| souvenir.release_year() == year)
        })
    }

    /// Souvenirs released in `year`, catalog-wide.
    pub fn find_souvenirs_by_release_date(&self, year: i32) -> Vec<Souvenir> {
        self.collect_souvenirs(|souvenir| souvenir.release_year() == year)
    }

    /// Full snapshot for callers that display the whole catalog.
    pub fn list_catalog(&self) -> Catalog {
        self.store.load()
    }

    /// Removes a manufacturer and every souvenir it owns.
    ///
    /// The snapshot is written back even when the name is unknown. Returns
    /// whether a manufacturer was removed.
    pub fn remove_manufacturer_and_souvenirs(&self, name: &str) -> ServiceResult<bool> {
        self.mutate("manufacturer_remove", |catalog| {
            Ok(catalog.remove_manufacturer(name).is_some())
        })
    }

    /// Renames a manufacturer located by its current name.
    pub fn update_manufacturer_name(
        &self,
        current_name: &str,
        new_name: impl Into<String>,
    ) -> ServiceResult<Manufacturer> {
        let new_name = new_name.into();
        self.mutate("manufacturer_rename", |catalog| {
            if !catalog.contains_manufacturer(current_name) {
                return Err(CatalogServiceError::ManufacturerNotFound(
                    current_name.to_string(),
                ));
            }
            if new_name != current_name && catalog.contains_manufacturer(&new_name) {
                return Err(CatalogServiceError::DuplicateManufacturer(new_name));
            }
            let manufacturer = manufacturer_mut(catalog, current_name)?;
            manufacturer.set_name(new_name)?;
            Ok(manufacturer.clone())
        })
    }

    /// Changes the country of the first manufacturer located in `current_country`.
    pub fn update_manufacturer_country(
        &self,
        current_country: &str,
        new_country: impl Into<String>,
    ) -> ServiceResult<Manufacturer> {
        let new_country = new_country.into();
        self.mutate("manufacturer_country_update", |catalog| {
            let manufacturer = catalog
                .manufacturer_by_country_mut(current_country)
                .ok_or_else(|| CatalogServiceError::CountryNotFound(current_country.to_string()))?;
            manufacturer.set_country(new_country)?;
            Ok(manufacturer.clone())
        })
    }

    /// Renames one souvenir; the new name must not collide with a sibling.
    pub fn update_souvenir_name(
        &self,
        manufacturer_name: &str,
        current_name: &str,
        new_name: impl Into<String>,
    ) -> ServiceResult<Souvenir> {
        let new_name = new_name.into();
        self.mutate("souvenir_rename", |catalog| {
            let manufacturer = manufacturer_mut(catalog, manufacturer_name)?;
            if !manufacturer.rename_souvenir(current_name, new_name.as_str())? {
                return Err(souvenir_not_found(manufacturer_name, current_name));
            }
            manufacturer
                .souvenir(&new_name)
                .cloned()
                .ok_or_else(|| souvenir_not_found(manufacturer_name, &new_name))
        })
    }

    pub fn update_souvenir_manufacturer_details(
        &self,
        manufacturer_name: &str,
        souvenir_name: &str,
        manufacturer_details: impl Into<String>,
    ) -> ServiceResult<Souvenir> {
        let manufacturer_details = manufacturer_details.into();
        self.update_souvenir(
            "souvenir_details_update",
            manufacturer_name,
            souvenir_name,
            |souvenir| {
                souvenir.set_manufacturer_details(manufacturer_details);
                Ok(())
            },
        )
    }

    /// Sets the release date from `dd.MM.yyyy` text.
    ///
    /// Unparseable text is reported as a validation error and nothing is written.
    pub fn update_souvenir_release_date(
        &self,
        manufacturer_name: &str,
        souvenir_name: &str,
        release_date: &str,
    ) -> ServiceResult<Souvenir> {
        self.update_souvenir(
            "souvenir_release_date_update",
            manufacturer_name,
            souvenir_name,
            |souvenir| {
                souvenir.set_release_date(parse_release_date(release_date)?);
                Ok(())
            },
        )
    }

    /// Sets the release date from an already typed calendar date.
    pub fn update_souvenir_release_date_value(
        &self,
        manufacturer_name: &str,
        souvenir_name: &str,
        release_date: NaiveDate,
    ) -> ServiceResult<Souvenir> {
        self.update_souvenir(
            "souvenir_release_date_update",
            manufacturer_name,
            souvenir_name,
            |souvenir| {
                souvenir.set_release_date(release_date);
                Ok(())
            },
        )
    }

    pub fn update_souvenir_price(
        &self,
        manufacturer_name: &str,
        souvenir_name: &str,
        price: f64,
    ) -> ServiceResult<Souvenir> {
        self.update_souvenir(
            "souvenir_price_update",
            manufacturer_name,
            souvenir_name,
            |souvenir| souvenir.set_price(price),
        )
    }

    fn update_souvenir(
        &self,
        operation: &'static str,
        manufacturer_name: &str,
        souvenir_name: &str,
        apply: impl FnOnce(&mut Souvenir) -> Result<(), ModelValidationError>,
    ) -> ServiceResult<Souvenir> {
        self.mutate(operation, |catalog| {
            let souvenir = manufacturer_mut(catalog, manufacturer_name)?
                .souvenir_mut(souvenir_name)
                .ok_or_else(|| souvenir_not_found(manufacturer_name, souvenir_name))?;
            apply(souvenir)?;
            Ok(souvenir.clone())
        })
    }

    /// Runs one read-modify-write cycle.
    ///
    /// `apply` must reject before mutating; the snapshot is only saved when it
    /// returns `Ok`.
    fn mutate<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut Catalog) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let mut catalog = self.store.load();

        let value = match apply(&mut catalog) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event={operation} module=service status=rejected error_code={} error={}",
                    err.code(),
                    err
                );
                return Err(err);
            }
        };

        if let Err(err) = self.store.save(&catalog) {
            error!(
                "event={operation} module=service status=error error_code={} error={}",
                err.code(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event={operation} module=service status=ok manufacturers={} souvenirs={}",
            catalog.len(),
            catalog.souvenir_count()
        );
        Ok(value)
    }

    fn collect_souvenirs(&self, predicate: impl Fn(&Souvenir) -> bool) -> Vec<Souvenir> {
        self.store
            .load()
            .into_manufacturers()
            .into_iter()
            .flat_map(Manufacturer::into_souvenirs)
            .filter(|souvenir| predicate(souvenir))
            .collect()
    }

    fn collect_manufacturers(
        &self,
        predicate: impl Fn(&Manufacturer) -> bool,
    ) -> Vec<Manufacturer> {
        self.store
            .load()
            .into_manufacturers()
            .into_iter()
            .filter(|manufacturer| predicate(manufacturer))
            .collect()
    }
}

fn manufacturer_mut<'a>(
    catalog: &'a mut Catalog,
    name: &str,
) -> ServiceResult<&'a mut Manufacturer> {
    catalog
        .manufacturer_mut(name)
        .ok_or_else(|| CatalogServiceError::ManufacturerNotFound(name.to_string()))
}

fn souvenir_not_found(manufacturer: &str, souvenir: &str) -> CatalogServiceError {
    CatalogServiceError::SouvenirNotFound {
        manufacturer: manufacturer.to_string(),
        souvenir: souvenir.to_string(),
    }
}
