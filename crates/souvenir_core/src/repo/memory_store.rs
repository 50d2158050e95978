//! In-memory catalog store.
//!
//! Holds the encoded snapshot bytes instead of live values, so every `load`
//! hands out an independent snapshot exactly like the file-backed store.

use super::catalog_store::{decode_snapshot, encode_snapshot, CatalogStore, StoreResult};
use crate::model::catalog::Catalog;
use std::cell::{Cell, RefCell};

/// Non-durable catalog store for tests and embedded callers.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    snapshot: RefCell<Vec<u8>>,
    save_count: Cell<usize>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw snapshot bytes, bypassing encoding.
    pub fn with_raw_snapshot(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            snapshot: RefCell::new(bytes.into()),
            save_count: Cell::new(0),
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn try_load(&self) -> StoreResult<Catalog> {
        decode_snapshot(&self.snapshot.borrow())
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        let bytes = encode_snapshot(catalog)?;
        *self.snapshot.borrow_mut() = bytes;
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}
