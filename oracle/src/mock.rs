// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

//! This module provides a mock validator set for tests.

use atlas_types::{AccountAddress, HashValue, ValidatorInfo, ValidatorSetView, VotingPower};
use std::sync::RwLock;

/// An in-memory validator set whose membership can be churned between
/// votes to exercise epoch-change re-tallies. The snapshot hash is the
/// SHA3-256 of the BCS of the current validator list, so any change to
/// membership or power yields a new snapshot identity.
#[derive(Debug, Default)]
pub struct MockValidatorSet {
    validators: RwLock<Vec<ValidatorInfo>>,
}

impl MockValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validators(validators: Vec<ValidatorInfo>) -> Self {
        Self {
            validators: RwLock::new(validators),
        }
    }

    pub fn add_validator(&self, validator: ValidatorInfo) {
        self.validators.write().unwrap().push(validator);
    }

    pub fn remove_validator(&self, address: &AccountAddress) {
        self.validators
            .write()
            .unwrap()
            .retain(|validator| validator.account_address() != address);
    }
}

impl ValidatorSetView for MockValidatorSet {
    fn validator(&self, address: &AccountAddress) -> Option<ValidatorInfo> {
        self.validators
            .read()
            .unwrap()
            .iter()
            .find(|validator| validator.account_address() == address)
            .cloned()
    }

    fn total_voting_power(&self) -> VotingPower {
        self.validators
            .read()
            .unwrap()
            .iter()
            .map(|validator| validator.voting_power())
            .sum()
    }

    fn validators_hash(&self) -> HashValue {
        let validators = self.validators.read().unwrap();
        let bytes = bcs::to_bytes(&*validators).expect("validator list must encode");
        HashValue::sha3_256_of(&bytes)
    }

    fn for_each_validator(&self, f: &mut dyn FnMut(usize, &ValidatorInfo) -> bool) {
        for (index, validator) in self.validators.read().unwrap().iter().enumerate() {
            if f(index, validator) {
                break;
            }
        }
    }
}
