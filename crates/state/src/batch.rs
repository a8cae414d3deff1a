use std::collections::BTreeMap;

use alloy_primitives::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use gantry_bridge_types::{SignatureSet, WithdrawalBatch};
use tracing::{info, warn};

use crate::{BridgeError, TokenCustody, ValidatorSetRegistry};

/// Executes withdrawal batches and tracks the last batch nonce per token.
#[derive(Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct BatchExecutor {
    last_batch_nonce: BTreeMap<Address, u64>,
}

impl BatchExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last executed batch nonce for `token`, 0 if none has executed.
    pub fn last_batch_nonce(&self, token: Address) -> u64 {
        self.last_batch_nonce.get(&token).copied().unwrap_or(0)
    }

    /// Verifies and executes `batch`, paying out of `custodian`'s balance.
    ///
    /// Each transaction's amount goes to its destination; the summed fees go
    /// to `relayer`. The batch nonce is recorded before any funds move.
    ///
    /// This mutates `self` and `custody` as it goes and does not undo partial
    /// work on error. Callers run it against staged copies and discard them on
    /// failure, which is what [`Bridge`](crate::Bridge) does.
    pub fn execute<C: TokenCustody>(
        &mut self,
        registry: &ValidatorSetRegistry,
        batch: &WithdrawalBatch,
        signatures: &SignatureSet,
        custody: &mut C,
        custodian: Address,
        relayer: Address,
    ) -> Result<(), BridgeError> {
        let token = batch.token_contract();
        let provided = batch.batch_nonce();
        let last = self.last_batch_nonce(token);
        if provided <= last {
            warn!(%token, provided, last, "rejecting stale batch");
            return Err(BridgeError::StaleBatchNonce {
                token,
                provided,
                last,
            });
        }

        let digest = batch.signing_digest(&registry.bridge_id());
        let signed_power = registry.verify(signatures, &digest)?;
        let total_fee = batch.total_fee()?;

        self.last_batch_nonce.insert(token, provided);

        for tx in batch.transactions() {
            custody.transfer(token, custodian, tx.destination, tx.amount)?;
        }
        if !total_fee.is_zero() {
            custody.transfer(token, custodian, relayer, total_fee)?;
        }

        info!(
            %token,
            batch_nonce = provided,
            transactions = batch.transactions().len(),
            %total_fee,
            %relayer,
            signed_power,
            "executed withdrawal batch"
        );
        Ok(())
    }
}
