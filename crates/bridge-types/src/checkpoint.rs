use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{
    codec::{compute_checkpoint, signing_digest},
    BridgeId, ValidatorSet,
};

/// Commitment binding a validator set, its nonce and the bridge id.
///
/// A checkpoint is only meaningful relative to the set it was derived from;
/// [`Checkpoint::matches`] recomputes the commitment to check that relation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Checkpoint {
    bridge_id: BridgeId,
    nonce: u64,
    commitment: B256,
}

impl Checkpoint {
    pub fn compute(bridge_id: BridgeId, validators: &ValidatorSet, nonce: u64) -> Self {
        Self {
            bridge_id,
            nonce,
            commitment: compute_checkpoint(&bridge_id, validators, nonce),
        }
    }

    pub fn bridge_id(&self) -> BridgeId {
        self.bridge_id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn commitment(&self) -> B256 {
        self.commitment
    }

    /// Digest validators sign to approve this checkpoint.
    pub fn signing_digest(&self) -> B256 {
        signing_digest(&self.commitment)
    }

    /// Whether this checkpoint was derived from `validators`.
    pub fn matches(&self, validators: &ValidatorSet) -> bool {
        compute_checkpoint(&self.bridge_id, validators, self.nonce) == self.commitment
    }
}
