use alloy_primitives::{Address, U256};
use borsh::{BorshDeserialize, BorshSerialize};
use gantry_bridge_types::{DepositRecord, DestinationAddress};
use tracing::debug;

use crate::BridgeError;

/// Assigns event nonces to outbound deposits.
///
/// The first deposit gets nonce 1 and every later one the next integer, with
/// no gaps and no reuse.
#[derive(Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct DepositLedger {
    last_event_nonce: u64,
}

impl DepositLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_event_nonce(&self) -> u64 {
        self.last_event_nonce
    }

    /// Records a deposit and advances the event nonce.
    ///
    /// Leaves the nonce unchanged on error.
    pub fn record(
        &mut self,
        token: Address,
        sender: Address,
        destination: DestinationAddress,
        amount: U256,
    ) -> Result<DepositRecord, BridgeError> {
        if amount.is_zero() {
            return Err(BridgeError::ZeroAmount);
        }
        let event_nonce = self
            .last_event_nonce
            .checked_add(1)
            .ok_or(BridgeError::NonceExhausted)?;
        self.last_event_nonce = event_nonce;

        debug!(%token, %sender, %destination, %amount, event_nonce, "recorded deposit");
        Ok(DepositRecord::new(token, sender, destination, amount, event_nonce))
    }
}
