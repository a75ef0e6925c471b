//! In-memory laptop store

use indexmap::{map::Entry, IndexMap};
use parking_lot::RwLock;

use super::{StoreError, StoreResult};
use crate::models::laptop::Laptop;

/// Laptops keyed by id, kept in insertion order.
///
/// Records are only ever appended, so a position stays valid for the life of
/// the store. Every read hands out a clone; nothing outside can reach the
/// stored value.
#[derive(Debug, Default)]
pub struct LaptopStore {
    data: RwLock<IndexMap<String, Laptop>>,
}

impl LaptopStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `laptop`. Fails if its id is already taken.
    pub fn save(&self, laptop: &Laptop) -> StoreResult<()> {
        if laptop.id.is_empty() {
            return Err(StoreError::Internal("cannot save a laptop without id".to_string()));
        }

        // Existence check and insert under one write guard
        let mut data = self.data.write();
        match data.entry(laptop.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(laptop.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(laptop.clone());
                Ok(())
            }
        }
    }

    /// Copy of the laptop with the given id
    pub fn find(&self, id: &str) -> Option<Laptop> {
        self.data.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the laptop at `index` (insertion order), only if `keep` accepts it.
    ///
    /// `keep` runs under the read guard and must not block.
    pub fn copy_at_if<F>(&self, index: usize, keep: F) -> Option<Laptop>
    where
        F: FnOnce(&Laptop) -> bool,
    {
        let data = self.data.read();
        let (_, laptop) = data.get_index(index)?;
        keep(laptop).then(|| laptop.clone())
    }
}
