// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{elem_key, index_from_key, CollectionsError, ELEM_KEY_TAG, LENGTH_KEY};
use atlas_kv_store::KVStore;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// An append-only indexed list of BCS-encoded elements in a store
/// namespace.
///
/// `len` only ever grows: it counts pushes, not surviving elements.
/// Deleting leaves a hole and preserves the indices of the other
/// elements, so callers doing index arithmetic must expect
/// [`CollectionsError::ElementNotFound`] for deleted positions.
pub struct StoredList<'a, T> {
    store: &'a mut dyn KVStore,
    _marker: PhantomData<T>,
}

impl<'a, T> StoredList<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a mut dyn KVStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// The number of elements ever pushed. Initializes the length
    /// record to zero on first use.
    pub fn len(&mut self) -> Result<u64, CollectionsError> {
        match self.store.get(&LENGTH_KEY) {
            Some(bytes) => Ok(bcs::from_bytes(&bytes)?),
            None => {
                self.set_len(0)?;
                Ok(0)
            },
        }
    }

    pub fn is_empty(&mut self) -> Result<bool, CollectionsError> {
        Ok(self.len()? == 0)
    }

    pub fn get(&self, index: u64) -> Result<T, CollectionsError> {
        let bytes = self
            .store
            .get(&elem_key(index))
            .ok_or(CollectionsError::ElementNotFound(index))?;
        Ok(bcs::from_bytes(&bytes)?)
    }

    /// Stores `value` at `index` without touching the length record.
    /// Setting past the end breaks length counting; use
    /// [`push`](Self::push) to append.
    pub fn set(&mut self, index: u64, value: &T) -> Result<(), CollectionsError> {
        let bytes = bcs::to_bytes(value)?;
        self.store.set(elem_key(index), bytes);
        Ok(())
    }

    /// Removes the element at `index`, leaving other indices intact.
    pub fn delete(&mut self, index: u64) {
        self.store.delete(&elem_key(index));
    }

    /// Appends `value` and bumps the length record.
    pub fn push(&mut self, value: &T) -> Result<u64, CollectionsError> {
        let index = self.len()?;
        self.set(index, value)?;
        self.set_len(index + 1)?;
        Ok(index)
    }

    /// Visits every surviving element in index order. Return `true`
    /// from the callback to stop early.
    ///
    /// No writes may happen to the namespace while iterating.
    pub fn for_each(
        &self,
        mut f: impl FnMut(u64, T) -> bool,
    ) -> Result<(), CollectionsError> {
        for (key, bytes) in self.store.iter_prefix(&[ELEM_KEY_TAG]) {
            let index = index_from_key(&key)?;
            let value = bcs::from_bytes(&bytes)?;
            if f(index, value) {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn set_len(&mut self, len: u64) -> Result<(), CollectionsError> {
        let bytes = bcs::to_bytes(&len)?;
        self.store.set(LENGTH_KEY.to_vec(), bytes);
        Ok(())
    }

    // Raw access for the queue's own records in the shared namespace.
    pub(crate) fn store_get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(key)
    }

    pub(crate) fn store_set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.store.set(key, value);
    }
}
