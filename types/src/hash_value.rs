// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// A 32-byte digest. Notably used as the snapshot identifier of a
/// validator set: any change to membership or voting power produces a
/// different `HashValue`.
#[derive(
    Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct HashValue {
    hash: [u8; HashValue::LENGTH],
}

impl HashValue {
    /// The length of the hash in bytes.
    pub const LENGTH: usize = 32;

    pub const fn new(hash: [u8; Self::LENGTH]) -> Self {
        Self { hash }
    }

    pub const fn zero() -> Self {
        Self {
            hash: [0u8; Self::LENGTH],
        }
    }

    pub fn random() -> Self {
        use rand::RngCore;

        let mut hash = [0u8; Self::LENGTH];
        rand::thread_rng().fill_bytes(&mut hash);
        Self { hash }
    }

    /// SHA3-256 of `bytes`.
    pub fn sha3_256_of(bytes: &[u8]) -> Self {
        let digest = Sha3_256::digest(bytes);
        let mut hash = [0u8; Self::LENGTH];
        hash.copy_from_slice(digest.as_slice());
        Self { hash }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl AsRef<[u8; HashValue::LENGTH]> for HashValue {
    fn as_ref(&self) -> &[u8; HashValue::LENGTH] {
        &self.hash
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.to_hex())
    }
}
