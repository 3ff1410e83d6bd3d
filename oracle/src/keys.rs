// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

//! Store key derivation for voting records and vote markers.
//!
//! All keys prefix a one-byte tag to the payload's canonical encoding,
//! so every payload owns a contiguous key range and the markers for one
//! payload are a single prefix scan.

// TODO: prefix a payload type discriminator before the encoded bytes;
// two payload namespaces sharing a store region with different
// encodings can currently collide on these tags.

use atlas_types::{AccountAddress, Payload};

const INFO_TAG: u8 = 0x00;
const SIGN_TAG: u8 = 0x01;

/// `0x00 || encode(payload)` -> the payload's voting record.
pub(crate) fn info_key<P: Payload>(payload: &P) -> Result<Vec<u8>, bcs::Error> {
    tagged(INFO_TAG, payload)
}

/// `0x01 || encode(payload)` -> iteration prefix for all vote markers
/// of one payload.
pub(crate) fn sign_prefix<P: Payload>(payload: &P) -> Result<Vec<u8>, bcs::Error> {
    tagged(SIGN_TAG, payload)
}

/// `0x01 || encode(payload) || encode(signer)` -> one signer's vote
/// marker.
pub(crate) fn sign_key<P: Payload>(
    payload: &P,
    signer: &AccountAddress,
) -> Result<Vec<u8>, bcs::Error> {
    let mut key = sign_prefix(payload)?;
    key.extend_from_slice(&bcs::to_bytes(signer)?);
    Ok(key)
}

fn tagged<P: Payload>(tag: u8, payload: &P) -> Result<Vec<u8>, bcs::Error> {
    let encoded = payload.canonical_bytes()?;
    let mut key = Vec::with_capacity(1 + encoded.len());
    key.push(tag);
    key.extend_from_slice(&encoded);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
    struct Seq(u64);

    impl Payload for Seq {}

    #[test]
    fn record_and_marker_ranges_are_disjoint() {
        let payload = Seq(5);
        let info = info_key(&payload).unwrap();
        let prefix = sign_prefix(&payload).unwrap();
        assert_eq!(info[0], 0x00);
        assert_eq!(prefix[0], 0x01);
        assert_eq!(info[1..], prefix[1..]);
    }

    #[test]
    fn sign_key_extends_the_marker_prefix() {
        let payload = Seq(5);
        let signer = AccountAddress::from_u8(9);
        let key = sign_key(&payload, &signer).unwrap();
        let prefix = sign_prefix(&payload).unwrap();
        assert!(key.starts_with(&prefix));
        assert_eq!(key.len(), prefix.len() + AccountAddress::LENGTH);
    }

    #[test]
    fn distinct_payloads_get_distinct_ranges() {
        assert_ne!(
            sign_prefix(&Seq(1)).unwrap(),
            sign_prefix(&Seq(2)).unwrap(),
        );
    }
}
