// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace for module-local error codes, so codes from different
/// modules sharing a transaction pipeline cannot collide.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct Codespace(pub u16);

impl fmt::Display for Codespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of handling one transaction message, as reported back to the
/// routing layer. `code == 0` is success; anything else is a
/// module-local error code qualified by `codespace`, with a
/// human-readable `log`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TxResult {
    pub codespace: Codespace,
    pub code: u32,
    pub log: String,
}

impl TxResult {
    pub const CODE_OK: u32 = 0;

    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(codespace: Codespace, code: u32, log: impl Into<String>) -> Self {
        Self {
            codespace,
            code,
            log: log.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == Self::CODE_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_is_empty() {
        let result = TxResult::ok();
        assert!(result.is_ok());
        assert_eq!(result.code, TxResult::CODE_OK);
        assert!(result.log.is_empty());
    }

    #[test]
    fn error_result_carries_codespace_and_log() {
        let result = TxResult::error(Codespace(7), 1101, "not a validator");
        assert!(!result.is_ok());
        assert_eq!(result.codespace, Codespace(7));
        assert_eq!(result.log, "not a validator");
    }
}
