// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A 32-byte account address, used to identify validators and module
/// accounts. The BCS form is exactly [`AccountAddress::LENGTH`] bytes, so
/// addresses can be appended to store keys without a length prefix.
#[derive(
    Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize, Default,
)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    /// The number of bytes in an address.
    pub const LENGTH: usize = 32;
    /// The all-zero address. Never a valid signer.
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn random() -> Self {
        use rand::RngCore;

        let mut bytes = [0u8; Self::LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AccountAddressParseError> {
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| AccountAddressParseError)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Address with `num` as its first byte and zeroes elsewhere, for
    /// readable fixtures.
    pub fn from_u8(num: u8) -> Self {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[0] = num;
        Self(bytes)
    }

    pub fn short_str_lossless(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".into()
        } else {
            trimmed.into()
        }
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.short_str_lossless())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountAddress {
    type Err = AccountAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        // Short literals are zero-padded on the left.
        let padded;
        let s = if s.len() < Self::LENGTH * 2 {
            padded = format!("{:0>width$}", s, width = Self::LENGTH * 2);
            &padded
        } else {
            s
        };
        let bytes = hex::decode(s).map_err(|_| AccountAddressParseError)?;
        Self::from_bytes(&bytes)
    }
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("unable to parse account address")]
pub struct AccountAddressParseError;

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok, assert_ok_eq};

    #[test]
    fn bcs_form_is_exactly_32_bytes() {
        let addr = AccountAddress::random();
        let bytes = bcs::to_bytes(&addr).unwrap();
        assert_eq!(bytes.len(), AccountAddress::LENGTH);
        assert_eq!(bytes, addr.to_vec());
        assert_ok_eq!(bcs::from_bytes::<AccountAddress>(&bytes), addr);
    }

    #[test]
    fn parse_roundtrip() {
        let addr = AccountAddress::from_u8(0xb0);
        assert_ok_eq!(format!("{:?}", addr).parse::<AccountAddress>(), addr);
        assert_ok_eq!("0xb".parse::<AccountAddress>(), {
            let mut bytes = [0u8; AccountAddress::LENGTH];
            bytes[AccountAddress::LENGTH - 1] = 0x0b;
            AccountAddress::new(bytes)
        });
        assert_err!("0xzz".parse::<AccountAddress>());
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert_err!(AccountAddress::from_bytes(&[0u8; 16]));
        assert_ok!(AccountAddress::from_bytes(&[0u8; 32]));
    }

    #[test]
    fn zero_display_is_compact() {
        assert_eq!(AccountAddress::ZERO.to_string(), "0x0");
        assert_eq!(AccountAddress::from_u8(1).short_str_lossless().len(), 63);
    }
}
