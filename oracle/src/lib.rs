// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Byzantine-fault-tolerant agreement on externally-sourced payloads.
//!
//! A weighted validator set votes on an opaque payload (a price
//! observation, a cross-chain attestation); once the cumulative voting
//! power behind one payload strictly exceeds two thirds of the set's
//! total power, the payload is finalized and a downstream handler runs
//! exactly once, inside an isolated store view that commits only if the
//! handler succeeds.
//!
//! The [`OracleKeeper`] holds no state of its own. Every voting record
//! lives in the module's [`KVStore`](atlas_kv_store::KVStore) namespace
//! under keys derived from the payload's canonical encoding:
//!
//! ```text
//! 0x00 || encode(payload)                    voting record
//! 0x01 || encode(payload) || encode(signer)  per-signer vote marker
//! ```
//!
//! Aggregation is deterministic end to end: exact rational power
//! arithmetic, ordered marker scans, and a re-tally that drops votes
//! from signers who left the validator set whenever the set's snapshot
//! hash changed mid-round.

pub mod error;
pub mod keeper;
pub mod msgs;

pub(crate) mod keys;

#[cfg(any(test, feature = "testing"))]
pub mod mock;


pub use error::{
    HandlerError, OracleError, CODE_ALREADY_PROCESSED, CODE_ALREADY_SIGNED,
    CODE_EMPTY_VALIDATOR, CODE_NOT_VALIDATOR,
};
pub use keeper::{Finalization, Handler, OracleInfo, OracleKeeper};
pub use msgs::{handle_msg, OracleMsg};
