// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::OracleError,
    keeper::{Finalization, Handler, OracleKeeper},
};
use atlas_kv_store::KVStore;
use atlas_types::{AccountAddress, Payload, TxResult, ValidatorSetView};
use serde::{Deserialize, Serialize};

/// A vote transaction: `signer` vouches for `payload`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OracleMsg<P> {
    pub signer: AccountAddress,
    pub payload: P,
}

impl<P: Payload> OracleMsg<P> {
    pub fn new(signer: AccountAddress, payload: P) -> Self {
        Self { signer, payload }
    }

    /// Stateless validation run before dispatch.
    pub fn validate_basic(&self) -> Result<(), OracleError> {
        if self.signer == AccountAddress::ZERO {
            return Err(OracleError::EmptyValidator);
        }
        Ok(())
    }
}

/// Routing-layer entry point: validates the message, lets the keeper
/// handle the vote, and folds the outcome into the transaction result.
///
/// A downstream handler failure surfaces the handler's own
/// codespace/code/message in the result, but by that point the
/// agreement bookkeeping is already committed; only the handler's
/// writes were discarded.
pub fn handle_msg<P, V>(
    keeper: &OracleKeeper<P, V>,
    store: &mut dyn KVStore,
    handler: Handler<'_, P>,
    msg: OracleMsg<P>,
) -> TxResult
where
    P: Payload,
    V: ValidatorSetView,
{
    if let Err(err) = msg.validate_basic() {
        return err.into_tx_result(keeper.codespace());
    }
    match keeper.handle(store, handler, msg.signer, &msg.payload) {
        Ok(Finalization::HandlerFailed(err)) => err.into_tx_result(),
        Ok(_) => TxResult::ok(),
        Err(err) => err.into_tx_result(keeper.codespace()),
    }
}
