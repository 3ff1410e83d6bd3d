// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! List and queue collections persisted in an ordered byte store.
//!
//! Both collections live entirely behind a [`KVStore`](atlas_kv_store::KVStore)
//! namespace and keep no state in memory, so they can be handed out per
//! call the way module keepers hand out their stores. Element keys embed
//! a fixed-width, zero-padded decimal index, which makes lexicographic
//! key order equal to numeric index order.

pub mod list;
pub mod queue;

pub use list::StoredList;
pub use queue::StoredQueue;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionsError {
    #[error("codec failure: {0}")]
    Codec(#[from] bcs::Error),

    #[error("no element at index {0}")]
    ElementNotFound(u64),

    #[error("malformed element key: {0}")]
    MalformedKey(String),
}

/// Number of decimal digits in an element key's index suffix. Wide
/// enough for any `u64` index.
pub(crate) const INDEX_WIDTH: usize = 20;

pub(crate) const LENGTH_KEY: [u8; 1] = [0x00];
pub(crate) const ELEM_KEY_TAG: u8 = 0x01;
pub(crate) const TOP_KEY: [u8; 1] = [0x02];

/// `0x01 || %020d(index)`.
pub(crate) fn elem_key(index: u64) -> Vec<u8> {
    let mut key = vec![ELEM_KEY_TAG];
    key.extend_from_slice(format!("{:0width$}", index, width = INDEX_WIDTH).as_bytes());
    key
}

pub(crate) fn index_from_key(key: &[u8]) -> Result<u64, CollectionsError> {
    let malformed = || CollectionsError::MalformedKey(format!("{:02x?}", key));
    if key.len() != 1 + INDEX_WIDTH || key[0] != ELEM_KEY_TAG {
        return Err(malformed());
    }
    std::str::from_utf8(&key[1..])
        .map_err(|_| malformed())?
        .parse::<u64>()
        .map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok_eq};

    #[test]
    fn element_keys_order_numerically() {
        // lexicographic byte order must equal numeric index order
        let indices = [0u64, 1, 9, 10, 99, 100, 12345, u64::MAX];
        let mut keys: Vec<_> = indices.iter().map(|i| elem_key(*i)).collect();
        let sorted = keys.clone();
        keys.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn element_key_roundtrip() {
        for index in [0u64, 7, 20, u64::MAX] {
            assert_ok_eq!(index_from_key(&elem_key(index)), index);
        }
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert_err!(index_from_key(b"\x01not-a-number-at-all"));
        assert_err!(index_from_key(b"\x0100000000000000000001extra"));
        assert_err!(index_from_key(&[0x02; 21]));
    }
}
