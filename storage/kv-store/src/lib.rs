// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! This crate defines [`trait KVStore`](KVStore), the ordered
//! byte-key/byte-value store every Atlas module keeps its state behind,
//! together with the three in-memory implementations the framework
//! wires up around it:
//!
//! * [`MemKVStore`] — the `BTreeMap`-backed reference store,
//! * [`PrefixedKVStore`] — a key-prefixing view carving a private
//!   namespace out of a shared store,
//! * [`CachedKVStore`] — a copy-on-write overlay whose writes are
//!   buffered until explicitly committed to the parent.
//!
//! Keys are ordered lexicographically by their bytes, and prefix
//! iteration respects that order in both directions. Every operation is
//! deterministic: iteration order depends only on store contents.

pub mod cached;
pub mod mem;
pub mod prefixed;

pub use cached::{CachedKVStore, WriteSet};
pub use mem::MemKVStore;
pub use prefixed::PrefixedKVStore;

/// An ordered store of byte keys and byte values.
///
/// The contract is infallible: a missing key reads as `None`, writes
/// always take effect, and iteration yields owned `(key, value)` pairs
/// in lexicographic (or reverse lexicographic) key order.
pub trait KVStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over all entries whose key starts with `prefix`, in
    /// ascending key order.
    fn iter_prefix<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'a>;

    /// Iterates over all entries whose key starts with `prefix`, in
    /// descending key order.
    fn iter_prefix_rev<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'a>;
}

/// One owned `(key, value)` pair yielded by prefix iteration.
pub type KVEntry = (Vec<u8>, Vec<u8>);

/// The smallest byte string strictly greater than every string starting
/// with `prefix`, or `None` if no such bound exists (the prefix is empty
/// or all `0xff`). Used as the exclusive upper bound of prefix scans.
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.last_mut() {
        if *last == 0xff {
            end.pop();
        } else {
            *last += 1;
            return Some(end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_successor_increments_last_byte() {
        assert_eq!(prefix_successor(&[0x01, 0x02]), Some(vec![0x01, 0x03]));
        assert_eq!(prefix_successor(&[0x00]), Some(vec![0x01]));
    }

    #[test]
    fn prefix_successor_carries_past_trailing_ff() {
        assert_eq!(prefix_successor(&[0x01, 0xff, 0xff]), Some(vec![0x02]));
        assert_eq!(prefix_successor(&[0xff, 0xff]), None);
        assert_eq!(prefix_successor(&[]), None);
    }
}
