// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Core value types shared by the Atlas framework modules: account
//! addresses, digest values, exact-rational voting power, validator set
//! views and the transaction-level result shape.

pub mod account_address;
pub mod hash_value;
pub mod payload;
pub mod tx_result;
pub mod validator;
pub mod voting_power;

pub use account_address::AccountAddress;
pub use hash_value::HashValue;
pub use payload::Payload;
pub use tx_result::{Codespace, TxResult};
pub use validator::{BondStatus, ValidatorInfo, ValidatorSetView};
pub use voting_power::VotingPower;
