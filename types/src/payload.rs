// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// An externally-sourced value that validators vote on.
///
/// Identity is defined by the canonical encoding: two payloads are the
/// same value iff their encodings are byte-identical. The encoding is
/// BCS, which fixes field order and collection order, so any type whose
/// serde representation avoids nondeterministic containers encodes
/// deterministically.
pub trait Payload: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// The canonical byte encoding, used both for store key derivation
    /// and for equality.
    fn canonical_bytes(&self) -> Result<Vec<u8>, bcs::Error> {
        bcs::to_bytes(self)
    }
}
