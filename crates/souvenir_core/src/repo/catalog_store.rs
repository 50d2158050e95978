//! Catalog store contract and snapshot codec.
//!
//! # Responsibility
//! - Define whole-catalog load/save semantics shared by every backend.
//! - Encode and decode the versioned JSON snapshot envelope.
//!
//! # Invariants
//! - `load` never fails: decode and I/O failures yield an empty catalog.
//! - Decoded snapshots must pass `Catalog::validate()`; invalid persisted
//!   state is treated as undecodable, never partially accepted.
//! - `try_load(save(x)) == x` for every valid catalog.

use crate::model::catalog::Catalog;
use crate::model::validation::ModelValidationError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot format version written by this binary.
pub const CATALOG_FORMAT_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for catalog snapshots.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnsupportedFormatVersion {
        file_version: u32,
        latest_supported: u32,
    },
    InvalidData(ModelValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "catalog file i/o failed: {err}"),
            Self::Json(err) => write!(f, "catalog snapshot is not decodable: {err}"),
            Self::UnsupportedFormatVersion {
                file_version,
                latest_supported,
            } => write!(
                f,
                "catalog format version {file_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidData(err) => write!(f, "invalid persisted catalog data: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedFormatVersion { .. } => None,
            Self::InvalidData(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Whole-catalog persistence contract.
///
/// Implementations replace the stored snapshot in full on every `save`;
/// there is no partial or incremental write path.
pub trait CatalogStore {
    /// Reads the stored snapshot, surfacing the failure cause.
    fn try_load(&self) -> StoreResult<Catalog>;

    /// Replaces the stored snapshot with `catalog`.
    fn save(&self, catalog: &Catalog) -> StoreResult<()>;

    /// Reads the stored snapshot, absorbing any failure into an empty catalog.
    fn load(&self) -> Catalog {
        match self.try_load() {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(
                    "event=catalog_load module=repo status=absorbed error_code={} error={}",
                    err.code(),
                    err
                );
                Catalog::new()
            }
        }
    }
}

impl StoreError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_failed",
            Self::Json(_) => "decode_failed",
            Self::UnsupportedFormatVersion { .. } => "unsupported_version",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    format_version: u32,
    manufacturers: &'a Catalog,
}

#[derive(Deserialize)]
struct SnapshotIn {
    format_version: u32,
    #[serde(default)]
    manufacturers: Catalog,
}

/// Encodes a catalog into the on-disk snapshot bytes.
pub fn encode_snapshot(catalog: &Catalog) -> StoreResult<Vec<u8>> {
    let snapshot = SnapshotOut {
        format_version: CATALOG_FORMAT_VERSION,
        manufacturers: catalog,
    };
    Ok(serde_json::to_vec_pretty(&snapshot)?)
}

/// Decodes snapshot bytes; blank input is an empty catalog.
pub fn decode_snapshot(bytes: &[u8]) -> StoreResult<Catalog> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Catalog::new());
    }

    let snapshot: SnapshotIn = serde_json::from_slice(bytes)?;
    if snapshot.format_version > CATALOG_FORMAT_VERSION {
        return Err(StoreError::UnsupportedFormatVersion {
            file_version: snapshot.format_version,
            latest_supported: CATALOG_FORMAT_VERSION,
        });
    }
    snapshot
        .manufacturers
        .validate()
        .map_err(StoreError::InvalidData)?;
    Ok(snapshot.manufacturers)
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshot, encode_snapshot, StoreError, CATALOG_FORMAT_VERSION};
    use crate::model::catalog::Catalog;
    use crate::model::manufacturer::Manufacturer;
    use crate::model::souvenir::Souvenir;

    #[test]
    fn blank_input_decodes_to_empty_catalog() {
        assert!(decode_snapshot(b"").unwrap().is_empty());
        assert!(decode_snapshot(b" \n\t").unwrap().is_empty());
    }

    #[test]
    fn snapshot_uses_versioned_envelope_and_iso_dates() {
        let mut acme = Manufacturer::new("Acme", "USA").unwrap();
        acme.add_souvenir(Souvenir::parse("Mug", "123 St", "01.01.2020", 9.99).unwrap())
            .unwrap();
        let catalog = Catalog::from(vec![acme]);

        let bytes = encode_snapshot(&catalog).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["format_version"], CATALOG_FORMAT_VERSION);
        assert_eq!(json["manufacturers"][0]["name"], "Acme");
        assert_eq!(
            json["manufacturers"][0]["souvenirs"][0]["release_date"],
            "2020-01-01"
        );

        assert_eq!(decode_snapshot(&bytes).unwrap(), catalog);
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let err = decode_snapshot(br#"{"format_version": 99, "manufacturers": []}"#).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedFormatVersion {
                file_version: 99,
                ..
            }
        ));
    }

    #[test]
    fn invariant_violations_in_file_are_rejected() {
        let raw = br#"{
            "format_version": 1,
            "manufacturers": [
                {"name": "Acme", "country": "USA", "souvenirs": []},
                {"name": "Acme", "country": "PL", "souvenirs": []}
            ]
        }"#;
        let err = decode_snapshot(raw).unwrap_err();
        assert_eq!(err.code(), "invalid_data");

        let negative_price = br#"{
            "format_version": 1,
            "manufacturers": [
                {"name": "Acme", "country": "USA", "souvenirs": [
                    {"name": "Mug", "manufacturer_details": "", "release_date": "2020-01-01", "price": -1.0}
                ]}
            ]
        }"#;
        assert!(matches!(
            decode_snapshot(negative_price).unwrap_err(),
            StoreError::InvalidData(_)
        ));
    }
}
