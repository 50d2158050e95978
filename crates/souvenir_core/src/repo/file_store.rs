//! File-backed catalog store.
//!
//! # Responsibility
//! - Ensure the backing file exists when a store is opened.
//! - Replace the whole file atomically on every save.
//!
//! # Invariants
//! - `open` never writes snapshot content, it only creates an empty file.
//! - Saves go through a uniquely named sibling temp file plus rename, so
//!   readers observe either the old or the new snapshot, never a partial one.
//! - Concurrent saves from independent handles never share a temp file; the
//!   last rename wins.

use super::catalog_store::{decode_snapshot, encode_snapshot, CatalogStore, StoreResult};
use crate::model::catalog::Catalog;
use log::{debug, error, info};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Default catalog file name used when callers pass no explicit path.
pub const DEFAULT_CATALOG_FILE_NAME: &str = "souvenirs_data.json";

/// Catalog store persisting the snapshot as one JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    /// Opens a store at `path`, creating an empty file (and parent
    /// directories) when it does not exist yet.
    ///
    /// # Side effects
    /// - Emits a `catalog_open` event recording whether the file was created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let created = match ensure_file(&path) {
            Ok(created) => created,
            Err(err) => {
                error!(
                    "event=catalog_open module=repo status=error path={} error={}",
                    path.display(),
                    err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=catalog_open module=repo status=ok path={} created={}",
            path.display(),
            created
        );
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the catalog file; temp files are created there so
    /// the final rename stays on one filesystem.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_replace(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut temp = NamedTempFile::new_in(self.parent_dir())?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl CatalogStore for FileCatalogStore {
    fn try_load(&self) -> StoreResult<Catalog> {
        let bytes = fs::read(&self.path)?;
        let catalog = decode_snapshot(&bytes)?;
        debug!(
            "event=catalog_load module=repo status=ok manufacturers={} souvenirs={}",
            catalog.len(),
            catalog.souvenir_count()
        );
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        let started_at = Instant::now();
        let bytes = encode_snapshot(catalog)?;

        if let Err(err) = self.write_replace(&bytes) {
            error!(
                "event=catalog_save module=repo status=error path={} duration_ms={} error={}",
                self.path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        debug!(
            "event=catalog_save module=repo status=ok manufacturers={} bytes={} duration_ms={}",
            catalog.len(),
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Returns `true` when the file had to be created.
fn ensure_file(path: &Path) -> std::io::Result<bool> {
    if path.is_file() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(err),
    }
}
