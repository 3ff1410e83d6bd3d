// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{prefix_successor, KVEntry, KVStore};
use std::{
    collections::BTreeMap,
    ops::Bound::{Excluded, Included, Unbounded},
};

/// The in-memory reference implementation of [`KVStore`], backed by a
/// `BTreeMap` so iteration order is the key order by construction.
#[derive(Clone, Debug, Default)]
pub struct MemKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn prefix_range(
        &self,
        prefix: &[u8],
    ) -> std::collections::btree_map::Range<'_, Vec<u8>, Vec<u8>> {
        let lower = Included(prefix.to_vec());
        let upper = match prefix_successor(prefix) {
            Some(end) => Excluded(end),
            None => Unbounded,
        };
        self.data.range((lower, upper))
    }
}

impl KVStore for MemKVStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    fn iter_prefix<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'a> {
        Box::new(
            self.prefix_range(prefix)
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }

    fn iter_prefix_rev<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'a> {
        Box::new(
            self.prefix_range(prefix)
                .rev()
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> MemKVStore {
        let mut store = MemKVStore::new();
        store.set(vec![0x00], b"zero".to_vec());
        store.set(vec![0x01, 0x01], b"a".to_vec());
        store.set(vec![0x01, 0x02], b"b".to_vec());
        store.set(vec![0x01, 0x02, 0x00], b"c".to_vec());
        store.set(vec![0x02], b"two".to_vec());
        store
    }

    #[test]
    fn get_set_delete_has() {
        let mut store = MemKVStore::new();
        assert_eq!(store.get(b"k"), None);
        store.set(b"k".to_vec(), b"v".to_vec());
        assert!(store.has(b"k"));
        assert_eq!(store.get(b"k"), Some(b"v".to_vec()));
        store.delete(b"k");
        assert!(!store.has(b"k"));
        assert!(store.is_empty());
    }

    #[test]
    fn prefix_iteration_is_bounded_and_ordered() {
        let store = populated();
        let keys: Vec<_> = store.iter_prefix(&[0x01]).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![
            vec![0x01, 0x01],
            vec![0x01, 0x02],
            vec![0x01, 0x02, 0x00],
        ]);
    }

    #[test]
    fn reverse_iteration_flips_the_order() {
        let store = populated();
        let keys: Vec<_> = store.iter_prefix_rev(&[0x01]).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![
            vec![0x01, 0x02, 0x00],
            vec![0x01, 0x02],
            vec![0x01, 0x01],
        ]);
    }

    #[test]
    fn empty_prefix_scans_everything() {
        let store = populated();
        assert_eq!(store.iter_prefix(&[]).count(), 5);
    }

    #[test]
    fn all_ff_prefix_scans_to_the_end() {
        let mut store = populated();
        store.set(vec![0xff, 0xff, 0x01], b"tail".to_vec());
        let entries: Vec<_> = store.iter_prefix(&[0xff, 0xff]).collect();
        assert_eq!(entries, vec![(vec![0xff, 0xff, 0x01], b"tail".to_vec())]);
    }
}
