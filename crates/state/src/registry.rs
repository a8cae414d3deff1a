use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use gantry_bridge_types::{BridgeId, Checkpoint, PowerThreshold, SignatureSet, ValidatorSet};
use gantry_crypto::threshold_signature::{verify_threshold_signatures, ThresholdSignatureError};

use crate::BridgeError;

/// The currently trusted checkpoint together with the validator set it
/// commits to and the power threshold that set must meet.
///
/// Only [`rotate_validator_set`](crate::rotate_validator_set) replaces the
/// contents, and it always replaces both fields together.
#[derive(Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct ValidatorSetRegistry {
    checkpoint: Checkpoint,
    validators: ValidatorSet,
    power_threshold: PowerThreshold,
}

impl ValidatorSetRegistry {
    /// Creates the registry for a fresh bridge; the genesis set has nonce 0.
    pub fn genesis(
        bridge_id: BridgeId,
        power_threshold: PowerThreshold,
        validators: ValidatorSet,
    ) -> Self {
        Self {
            checkpoint: Checkpoint::compute(bridge_id, &validators, 0),
            validators,
            power_threshold,
        }
    }

    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    pub fn bridge_id(&self) -> BridgeId {
        self.checkpoint.bridge_id()
    }

    pub fn nonce(&self) -> u64 {
        self.checkpoint.nonce()
    }

    pub fn total_power(&self) -> u64 {
        self.validators.total_power()
    }

    pub fn power_threshold(&self) -> PowerThreshold {
        self.power_threshold
    }

    /// Verifies `signatures` over `digest` against the current set.
    pub fn verify(
        &self,
        signatures: &SignatureSet,
        digest: &B256,
    ) -> Result<u64, ThresholdSignatureError> {
        verify_threshold_signatures(&self.validators, self.power_threshold, signatures, digest)
    }

    /// Checks that the stored threshold is in range and that the stored
    /// checkpoint is reproducible from the stored set.
    pub fn check_consistency(&self) -> Result<(), BridgeError> {
        if self.checkpoint.bridge_id().as_b256().is_zero() {
            return Err(BridgeError::InvariantViolation("bridge id is zero".to_owned()));
        }
        if PowerThreshold::try_new(self.power_threshold.get()).is_err() {
            return Err(BridgeError::InvariantViolation(format!(
                "power threshold {} out of range",
                self.power_threshold.get()
            )));
        }
        if !self.checkpoint.matches(&self.validators) {
            return Err(BridgeError::InvariantViolation(format!(
                "checkpoint {} does not match validator set at nonce {}",
                self.checkpoint.commitment(),
                self.checkpoint.nonce()
            )));
        }

        let summed = self
            .validators
            .validators()
            .iter()
            .try_fold(0u64, |acc, v| acc.checked_add(v.power));
        if summed != Some(self.validators.total_power()) {
            return Err(BridgeError::InvariantViolation(
                "total power does not equal the sum of validator powers".to_owned(),
            ));
        }
        Ok(())
    }

    pub(crate) fn replace(&mut self, checkpoint: Checkpoint, validators: ValidatorSet) {
        self.checkpoint = checkpoint;
        self.validators = validators;
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;

    use super::*;

    #[test]
    fn test_genesis_consistent() {
        let id = BridgeId::from_name("foo").unwrap();
        let set = ValidatorSet::try_from_parts(&[Address::repeat_byte(1)], &[10]).unwrap();
        let registry = ValidatorSetRegistry::genesis(id, PowerThreshold::default(), set);
        assert_eq!(registry.nonce(), 0);
        assert_eq!(registry.total_power(), 10);
        assert!(registry.check_consistency().is_ok());
    }

    #[test]
    fn test_detects_mismatched_checkpoint() {
        let id = BridgeId::from_name("foo").unwrap();
        let a = ValidatorSet::try_from_parts(&[Address::repeat_byte(1)], &[10]).unwrap();
        let b = ValidatorSet::try_from_parts(&[Address::repeat_byte(2)], &[10]).unwrap();
        let mut registry = ValidatorSetRegistry::genesis(id, PowerThreshold::default(), a);
        registry.replace(Checkpoint::compute(id, &b, 1), registry.validators().clone());
        assert!(matches!(
            registry.check_consistency(),
            Err(BridgeError::InvariantViolation(_))
        ));
    }
}
