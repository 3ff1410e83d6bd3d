// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use atlas_types::{AccountAddress, Codespace, TxResult};
use thiserror::Error;

// Oracle errors reserve codes 1101-1199.
pub const CODE_NOT_VALIDATOR: u32 = 1101;
pub const CODE_ALREADY_PROCESSED: u32 = 1102;
pub const CODE_ALREADY_SIGNED: u32 = 1103;
pub const CODE_EMPTY_VALIDATOR: u32 = 1104;
pub const CODE_INTERNAL: u32 = 1190;

/// Failure modes of oracle vote handling. Every variant maps to a
/// module-local code for the transaction result; none of them leaves
/// partial state behind.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("payload is not signed by a validator: {0}")]
    NotValidator(AccountAddress),

    #[error("payload is already processed")]
    AlreadyProcessed,

    #[error("payload is already signed by {0}")]
    AlreadySigned(AccountAddress),

    #[error("signer address is empty")]
    EmptyValidator,

    #[error("storage codec failure: {0}")]
    Codec(#[from] bcs::Error),
}

impl OracleError {
    pub fn code(&self) -> u32 {
        match self {
            Self::NotValidator(_) => CODE_NOT_VALIDATOR,
            Self::AlreadyProcessed => CODE_ALREADY_PROCESSED,
            Self::AlreadySigned(_) => CODE_ALREADY_SIGNED,
            Self::EmptyValidator => CODE_EMPTY_VALIDATOR,
            Self::Codec(_) => CODE_INTERNAL,
        }
    }

    pub fn into_tx_result(self, codespace: Codespace) -> TxResult {
        TxResult::error(codespace, self.code(), self.to_string())
    }
}

/// Typed error surfaced by a downstream payload handler. The code and
/// codespace belong to the handler's own module, not to the oracle.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{message}")]
pub struct HandlerError {
    pub codespace: Codespace,
    pub code: u32,
    pub message: String,
}

impl HandlerError {
    pub fn new(codespace: Codespace, code: u32, message: impl Into<String>) -> Self {
        Self {
            codespace,
            code,
            message: message.into(),
        }
    }

    pub fn into_tx_result(self) -> TxResult {
        TxResult::error(self.codespace, self.code, self.message)
    }
}
