// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{CollectionsError, StoredList, TOP_KEY};
use atlas_kv_store::KVStore;
use serde::{de::DeserializeOwned, Serialize};

/// A FIFO queue of BCS-encoded elements in a store namespace, built on
/// [`StoredList`] plus a persisted top pointer.
///
/// Indices below the top pointer are popped and are never re-read.
pub struct StoredQueue<'a, T> {
    list: StoredList<'a, T>,
}

impl<'a, T> StoredQueue<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a mut dyn KVStore) -> Self {
        Self {
            list: StoredList::new(store),
        }
    }

    /// Appends `value` to the rear of the queue.
    pub fn push(&mut self, value: &T) -> Result<(), CollectionsError> {
        self.list.push(value)?;
        Ok(())
    }

    /// The element at the front of the queue, without removing it.
    pub fn peek(&mut self) -> Result<Option<T>, CollectionsError> {
        if self.is_empty()? {
            return Ok(None);
        }
        let top = self.top()?;
        Ok(Some(self.list.get(top)?))
    }

    /// Removes and returns the element at the front of the queue.
    pub fn pop(&mut self) -> Result<Option<T>, CollectionsError> {
        if self.is_empty()? {
            return Ok(None);
        }
        let top = self.top()?;
        let value = self.list.get(top)?;
        self.list.delete(top);
        self.set_top(top + 1)?;
        Ok(Some(value))
    }

    pub fn is_empty(&mut self) -> Result<bool, CollectionsError> {
        Ok(self.top()? >= self.list.len()?)
    }

    /// Pops elements front to back, handing each to `f`, while `f`
    /// returns `true`.
    ///
    /// The element passed to the closure is already popped: after a
    /// stop, the top pointer rests on the first element the closure
    /// never saw.
    pub fn flush_while(
        &mut self,
        mut f: impl FnMut(T) -> bool,
    ) -> Result<(), CollectionsError> {
        let len = self.list.len()?;
        let mut index = self.top()?;
        while index < len {
            let value = self.list.get(index)?;
            self.list.delete(index);
            index += 1;
            if !f(value) {
                break;
            }
        }
        self.set_top(index)
    }

    /// The index of the front element. Initializes the top record to
    /// zero on first use.
    fn top(&mut self) -> Result<u64, CollectionsError> {
        match self.list.store_get(&TOP_KEY) {
            Some(bytes) => Ok(bcs::from_bytes(&bytes)?),
            None => {
                self.set_top(0)?;
                Ok(0)
            },
        }
    }

    fn set_top(&mut self, top: u64) -> Result<(), CollectionsError> {
        let bytes = bcs::to_bytes(&top)?;
        self.list.store_set(TOP_KEY.to_vec(), bytes);
        Ok(())
    }
}
