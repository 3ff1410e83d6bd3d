// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{HandlerError, OracleError},
    keys,
};
use atlas_kv_store::{CachedKVStore, KVStore};
use atlas_types::{
    AccountAddress, Codespace, HashValue, Payload, ValidatorInfo, ValidatorSetView, VotingPower,
};
use serde::{Deserialize, Serialize};
use std::{marker::PhantomData, sync::Arc};
use tracing::{debug, info, warn};

/// Per-payload voting record.
///
/// `validators_hash` identifies the validator-set snapshot the power was
/// accumulated under; a mismatch against the current snapshot forces a
/// re-tally before any further power counts. `processed` transitions
/// false to true at most once and never resets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OracleInfo {
    pub power: VotingPower,
    pub validators_hash: HashValue,
    pub processed: bool,
}

impl OracleInfo {
    /// A fresh record under the given snapshot: no power, unprocessed.
    pub fn new(validators_hash: HashValue) -> Self {
        Self {
            power: VotingPower::zero(),
            validators_hash,
            processed: false,
        }
    }

    /// The cleared form a record is stored in once finalized. Power and
    /// snapshot no longer matter; only the processed flag is load-bearing.
    fn processed_marker() -> Self {
        Self {
            power: VotingPower::zero(),
            validators_hash: HashValue::zero(),
            processed: true,
        }
    }
}

/// What [`OracleKeeper::handle`] did with the vote.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Finalization {
    /// Vote counted; cumulative power has not crossed the threshold.
    NotReached,
    /// The vote finalized the payload and the downstream handler's
    /// writes were committed.
    Committed,
    /// The vote finalized the payload but the downstream handler
    /// failed; its writes were discarded. The agreement bookkeeping
    /// (processed record, cleared markers) is still committed.
    HandlerFailed(HandlerError),
}

/// A downstream state transition invoked exactly once, when a payload's
/// vote finalizes. Runs against an isolated store view; its writes are
/// merged only if it succeeds.
pub type Handler<'a, P> = &'a mut dyn FnMut(&mut dyn KVStore, &P) -> Result<(), HandlerError>;

/// Stateless orchestrator of payload voting. Holds the validator set
/// view and the module's codespace; every voting record lives in the
/// store passed into each call, and nothing is cached across calls.
pub struct OracleKeeper<P, V> {
    valset: Arc<V>,
    codespace: Codespace,
    _payload: PhantomData<P>,
}

impl<P, V> OracleKeeper<P, V>
where
    P: Payload,
    V: ValidatorSetView,
{
    pub fn new(valset: Arc<V>, codespace: Codespace) -> Self {
        Self {
            valset,
            codespace,
            _payload: PhantomData,
        }
    }

    pub fn codespace(&self) -> Codespace {
        self.codespace
    }

    /// The payload's voting record, lazily defaulting to an empty
    /// record under the current validator-set snapshot.
    pub fn oracle_info(
        &self,
        store: &dyn KVStore,
        payload: &P,
    ) -> Result<OracleInfo, OracleError> {
        match store.get(&keys::info_key(payload)?) {
            Some(bytes) => Ok(bcs::from_bytes(&bytes)?),
            None => Ok(OracleInfo::new(self.valset.validators_hash())),
        }
    }

    /// Handles one vote: validates the signer, records the vote,
    /// re-aggregates power and, if this vote crosses the supermajority
    /// threshold, dispatches the downstream handler under an isolated
    /// store view.
    ///
    /// The three precondition failures (`NotValidator`,
    /// `AlreadyProcessed`, `AlreadySigned`) are checked before any
    /// store mutation, so failure is side-effect-free. A downstream
    /// handler failure is NOT an error of this call: it is reported as
    /// [`Finalization::HandlerFailed`] and the agreement bookkeeping
    /// stays committed.
    pub fn handle(
        &self,
        store: &mut dyn KVStore,
        handler: Handler<'_, P>,
        signer: AccountAddress,
        payload: &P,
    ) -> Result<Finalization, OracleError> {
        let validator = self
            .valset
            .validator(&signer)
            .ok_or(OracleError::NotValidator(signer))?;

        let info = self.oracle_info(store, payload)?;
        if info.processed {
            return Err(OracleError::AlreadyProcessed);
        }
        if self.signed(store, payload, &signer)? {
            return Err(OracleError::AlreadySigned(signer));
        }

        self.sign(store, payload, &signer)?;
        debug!(signer = %signer, power = %validator.voting_power(), "recorded oracle vote");

        let mut info = self.update(store, &validator, payload, info)?;
        if info.processed {
            info = OracleInfo::processed_marker();
        }
        self.set_info(store, payload, &info)?;

        if !info.processed {
            return Ok(Finalization::NotReached);
        }

        // Markers are cleared on the real store before the isolated
        // view is taken: clearing is unconditional, and the handler
        // observes an already-cleared marker namespace.
        self.clear_signs(store, payload)?;
        info!(payload = ?payload, "oracle payload finalized, dispatching handler");

        let write_set = {
            let mut view = CachedKVStore::new(&*store);
            match handler(&mut view, payload) {
                Ok(()) => view.into_write_set(),
                Err(err) => {
                    warn!(error = %err, "oracle handler failed, discarding its writes");
                    return Ok(Finalization::HandlerFailed(err));
                },
            }
        };
        write_set.apply(store);

        Ok(Finalization::Committed)
    }

    /// Adds the voter's power to the record and applies the
    /// supermajority rule.
    ///
    /// The threshold is strict: equality does not finalize. If the
    /// threshold is crossed under a stale snapshot, the record is
    /// rebuilt by re-validating every recorded signer against the
    /// current validator set; signers that left the set are dropped
    /// (markers deleted), surviving signers are re-summed at their
    /// current power.
    fn update(
        &self,
        store: &mut dyn KVStore,
        voter: &ValidatorInfo,
        payload: &P,
        mut info: OracleInfo,
    ) -> Result<OracleInfo, OracleError> {
        info.power += voter.voting_power();

        let threshold = self.valset.total_voting_power().supermajority_threshold();
        if info.power <= threshold {
            return Ok(info);
        }

        let current_hash = self.valset.validators_hash();
        if info.validators_hash == current_hash {
            info.processed = true;
            return Ok(info);
        }

        // The set changed while this record accumulated power: votes
        // cast under the old snapshot only count if their signer is
        // still in the set.
        warn!(
            stale = %info.validators_hash,
            current = %current_hash,
            "validator set changed mid-round, re-tallying",
        );
        let mut fresh = OracleInfo::new(current_hash);
        let markers: Vec<_> = store.iter_prefix(&keys::sign_prefix(payload)?).collect();
        for (key, value) in markers {
            let signer: AccountAddress = bcs::from_bytes(&value)?;
            match self.valset.validator(&signer) {
                Some(survivor) => fresh.power += survivor.voting_power(),
                None => store.delete(&key),
            }
        }
        if fresh.power > threshold {
            fresh.processed = true;
        }
        Ok(fresh)
    }

    fn set_info(
        &self,
        store: &mut dyn KVStore,
        payload: &P,
        info: &OracleInfo,
    ) -> Result<(), OracleError> {
        let bytes = bcs::to_bytes(info)?;
        store.set(keys::info_key(payload)?, bytes);
        Ok(())
    }

    /// Persists the signer's vote marker. The marker value is the
    /// signer address, so a re-tally can recover the signer without
    /// parsing key suffixes.
    fn sign(
        &self,
        store: &mut dyn KVStore,
        payload: &P,
        signer: &AccountAddress,
    ) -> Result<(), OracleError> {
        let value = bcs::to_bytes(signer)?;
        store.set(keys::sign_key(payload, signer)?, value);
        Ok(())
    }

    fn signed(
        &self,
        store: &dyn KVStore,
        payload: &P,
        signer: &AccountAddress,
    ) -> Result<bool, OracleError> {
        Ok(store.has(&keys::sign_key(payload, signer)?))
    }

    fn clear_signs(&self, store: &mut dyn KVStore, payload: &P) -> Result<(), OracleError> {
        let marker_keys: Vec<_> = store
            .iter_prefix(&keys::sign_prefix(payload)?)
            .map(|(key, _)| key)
            .collect();
        for key in marker_keys {
            store.delete(&key);
        }
        Ok(())
    }
}
