// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{account_address::AccountAddress, hash_value::HashValue, voting_power::VotingPower};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bonding state of a validator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BondStatus {
    Bonded,
    Unbonding,
    Unbonded,
}

/// A validator as seen by framework modules: an owner address with an
/// exact-rational voting weight and a bonding state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    account_address: AccountAddress,
    voting_power: VotingPower,
    status: BondStatus,
}

impl ValidatorInfo {
    pub fn new(
        account_address: AccountAddress,
        voting_power: VotingPower,
        status: BondStatus,
    ) -> Self {
        Self {
            account_address,
            voting_power,
            status,
        }
    }

    pub fn account_address(&self) -> &AccountAddress {
        &self.account_address
    }

    pub fn voting_power(&self) -> &VotingPower {
        &self.voting_power
    }

    pub fn status(&self) -> BondStatus {
        self.status
    }

    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }
}

impl fmt::Display for ValidatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidatorInfo: [address: {}, power: {}]",
            self.account_address, self.voting_power
        )
    }
}

/// Read view of the validator set as of the current block.
///
/// Implementations are snapshots: the same view answers every query with
/// the same data, and [`validators_hash`](Self::validators_hash) is the
/// identity of that snapshot. Two views whose hashes are equal must
/// answer every other method identically.
pub trait ValidatorSetView {
    /// Looks up an active validator by its owner address.
    fn validator(&self, address: &AccountAddress) -> Option<ValidatorInfo>;

    /// Sum of the voting power of all validators in the set.
    fn total_voting_power(&self) -> VotingPower;

    /// Snapshot identifier of the set. Changes whenever membership or
    /// any validator's power changes.
    fn validators_hash(&self) -> HashValue;

    /// Visits every validator in a deterministic order. Return `true`
    /// from the callback to stop early.
    fn for_each_validator(&self, f: &mut dyn FnMut(usize, &ValidatorInfo) -> bool);

    /// Visits the bonded validators only, in the same order.
    fn for_each_bonded(&self, f: &mut dyn FnMut(usize, &ValidatorInfo) -> bool) {
        self.for_each_validator(&mut |index, validator| {
            if validator.is_bonded() {
                f(index, validator)
            } else {
                false
            }
        });
    }
}
