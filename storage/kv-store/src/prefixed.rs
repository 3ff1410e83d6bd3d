// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{KVEntry, KVStore};

/// A view of a parent store under a fixed key prefix.
///
/// Every operation prepends the prefix before touching the parent, and
/// iteration strips it again, so a module handed a `PrefixedKVStore`
/// sees a private namespace and cannot reach keys outside it.
pub struct PrefixedKVStore<'a> {
    store: &'a mut dyn KVStore,
    prefix: Vec<u8>,
}

impl<'a> PrefixedKVStore<'a> {
    pub fn new(store: &'a mut dyn KVStore, prefix: Vec<u8>) -> Self {
        Self { store, prefix }
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = self.prefix.clone();
        full.extend_from_slice(key);
        full
    }
}

impl KVStore for PrefixedKVStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(&self.full_key(key))
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        let full = self.full_key(&key);
        self.store.set(full, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.store.delete(&self.full_key(key));
    }

    fn has(&self, key: &[u8]) -> bool {
        self.store.has(&self.full_key(key))
    }

    fn iter_prefix<'b>(&'b self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'b> {
        let strip = self.prefix.len();
        Box::new(
            self.store
                .iter_prefix(&self.full_key(prefix))
                .map(move |(k, v)| (k[strip..].to_vec(), v)),
        )
    }

    fn iter_prefix_rev<'b>(&'b self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'b> {
        let strip = self.prefix.len();
        Box::new(
            self.store
                .iter_prefix_rev(&self.full_key(prefix))
                .map(move |(k, v)| (k[strip..].to_vec(), v)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemKVStore;

    #[test]
    fn operations_stay_inside_the_namespace() {
        let mut parent = MemKVStore::new();
        parent.set(b"other".to_vec(), b"untouched".to_vec());
        {
            let mut prefixed = PrefixedKVStore::new(&mut parent, b"ns/".to_vec());
            prefixed.set(b"k".to_vec(), b"v".to_vec());
            assert_eq!(prefixed.get(b"k"), Some(b"v".to_vec()));
            assert!(!prefixed.has(b"other"));
        }
        assert_eq!(parent.get(b"ns/k"), Some(b"v".to_vec()));
        assert_eq!(parent.get(b"other"), Some(b"untouched".to_vec()));
    }

    #[test]
    fn iteration_strips_the_namespace_prefix() {
        let mut parent = MemKVStore::new();
        let mut prefixed = PrefixedKVStore::new(&mut parent, vec![0xaa]);
        prefixed.set(vec![0x01], b"a".to_vec());
        prefixed.set(vec![0x02], b"b".to_vec());
        let keys: Vec<_> = prefixed.iter_prefix(&[]).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![vec![0x01], vec![0x02]]);
    }

    #[test]
    fn delete_only_touches_namespaced_keys() {
        let mut parent = MemKVStore::new();
        parent.set(b"k".to_vec(), b"outer".to_vec());
        {
            let mut prefixed = PrefixedKVStore::new(&mut parent, b"ns/".to_vec());
            prefixed.set(b"k".to_vec(), b"inner".to_vec());
            prefixed.delete(b"k");
        }
        assert_eq!(parent.get(b"k"), Some(b"outer".to_vec()));
        assert_eq!(parent.get(b"ns/k"), None);
    }
}
