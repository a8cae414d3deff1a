//! Withdrawal batches authorized by the validator set.

use alloy_primitives::{Address, B256, U256};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{
    codec::{compute_batch_commitment, signing_digest},
    BridgeId, CodecError,
};

/// A single payout in a withdrawal batch.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct BatchTransaction {
    pub destination: Address,
    pub amount: U256,
    /// Paid to the relayer that submits the batch, not to the destination.
    pub fee: U256,
}

impl BatchTransaction {
    pub const fn new(destination: Address, amount: U256, fee: U256) -> Self {
        Self {
            destination,
            amount,
            fee,
        }
    }
}

/// Ordered payouts of one token, executed together under one batch nonce.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
pub struct WithdrawalBatch {
    token_contract: Address,
    transactions: Vec<BatchTransaction>,
    batch_nonce: u64,
}

impl WithdrawalBatch {
    /// Creates a batch.
    ///
    /// # Errors
    ///
    /// `EmptyBatch` if there are no transactions.
    pub fn try_new(
        token_contract: Address,
        transactions: Vec<BatchTransaction>,
        batch_nonce: u64,
    ) -> Result<Self, CodecError> {
        if transactions.is_empty() {
            return Err(CodecError::EmptyBatch);
        }
        Ok(Self {
            token_contract,
            transactions,
            batch_nonce,
        })
    }

    /// Creates a batch from the parallel arrays relayers submit.
    pub fn from_parts(
        token_contract: Address,
        amounts: &[U256],
        destinations: &[Address],
        fees: &[U256],
        batch_nonce: u64,
    ) -> Result<Self, CodecError> {
        if amounts.len() != destinations.len() || amounts.len() != fees.len() {
            return Err(CodecError::BatchArrayMismatch {
                amounts: amounts.len(),
                destinations: destinations.len(),
                fees: fees.len(),
            });
        }
        let transactions = destinations
            .iter()
            .zip(amounts)
            .zip(fees)
            .map(|((destination, amount), fee)| BatchTransaction::new(*destination, *amount, *fee))
            .collect();
        Self::try_new(token_contract, transactions, batch_nonce)
    }

    pub fn token_contract(&self) -> Address {
        self.token_contract
    }

    pub fn transactions(&self) -> &[BatchTransaction] {
        &self.transactions
    }

    pub fn batch_nonce(&self) -> u64 {
        self.batch_nonce
    }

    /// Sum of all payout amounts.
    pub fn total_amount(&self) -> Result<U256, CodecError> {
        self.transactions.iter().try_fold(U256::ZERO, |acc, tx| {
            acc.checked_add(tx.amount).ok_or(CodecError::AmountOverflow)
        })
    }

    /// Sum of all relayer fees.
    pub fn total_fee(&self) -> Result<U256, CodecError> {
        self.transactions.iter().try_fold(U256::ZERO, |acc, tx| {
            acc.checked_add(tx.fee).ok_or(CodecError::AmountOverflow)
        })
    }

    pub fn commitment(&self, bridge_id: &BridgeId) -> B256 {
        compute_batch_commitment(bridge_id, self)
    }

    /// Digest validators sign to approve this batch.
    pub fn signing_digest(&self, bridge_id: &BridgeId) -> B256 {
        signing_digest(&self.commitment(bridge_id))
    }
}
