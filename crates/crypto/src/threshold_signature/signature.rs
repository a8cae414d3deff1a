//! Positional signature sets.

use alloy_primitives::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::{ThresholdSignatureError, ValidatorSet};
use crate::signature::EthSignature;

/// A signature together with the validator it is claimed to come from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct SignatureEntry {
    pub validator: Address,
    pub signature: EthSignature,
}

impl SignatureEntry {
    pub fn new(validator: Address, signature: EthSignature) -> Self {
        Self {
            validator,
            signature,
        }
    }
}

/// Signatures laid out in validator-set order.
///
/// Slot `i` holds the signature of the validator at position `i`, or `None`
/// if that validator abstained.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct SignatureSet {
    slots: Vec<Option<SignatureEntry>>,
}

impl SignatureSet {
    pub fn new(slots: Vec<Option<SignatureEntry>>) -> Self {
        Self { slots }
    }

    /// A set of `len` empty slots.
    pub fn abstaining(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Lays out loosely ordered signatures according to `validators`.
    ///
    /// This is the relayer-side helper; verification itself never reorders.
    pub fn arrange(
        validators: &ValidatorSet,
        entries: impl IntoIterator<Item = SignatureEntry>,
    ) -> Result<Self, ThresholdSignatureError> {
        let mut slots = vec![None; validators.len()];
        for entry in entries {
            let index = validators
                .position_of(&entry.validator)
                .ok_or(ThresholdSignatureError::UnknownSigner(entry.validator))?;
            if slots[index].is_some() {
                return Err(ThresholdSignatureError::DuplicateSigner(entry.validator));
            }
            slots[index] = Some(entry);
        }
        Ok(Self { slots })
    }

    /// Places `entry` at `index`, growing the set with empty slots if needed.
    pub fn insert(&mut self, index: usize, entry: SignatureEntry) {
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(entry);
    }

    pub fn slots(&self) -> &[Option<SignatureEntry>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of present signatures.
    pub fn signed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;

    use super::*;

    fn entry(b: u8) -> SignatureEntry {
        SignatureEntry::new(
            Address::repeat_byte(b),
            EthSignature::new(B256::repeat_byte(b), B256::repeat_byte(b), 27),
        )
    }

    fn set() -> ValidatorSet {
        ValidatorSet::try_from_parts(
            &[
                Address::repeat_byte(1),
                Address::repeat_byte(2),
                Address::repeat_byte(3),
            ],
            &[10, 20, 30],
        )
        .unwrap()
    }

    #[test]
    fn test_arrange_places_by_position() {
        let sigs = SignatureSet::arrange(&set(), [entry(3), entry(1)]).unwrap();
        assert_eq!(sigs.len(), 3);
        assert_eq!(sigs.signed_count(), 2);
        assert_eq!(sigs.slots()[0], Some(entry(1)));
        assert_eq!(sigs.slots()[1], None);
        assert_eq!(sigs.slots()[2], Some(entry(3)));
    }

    #[test]
    fn test_arrange_rejects_unknown_and_duplicate() {
        assert_eq!(
            SignatureSet::arrange(&set(), [entry(9)]),
            Err(ThresholdSignatureError::UnknownSigner(Address::repeat_byte(9)))
        );
        assert_eq!(
            SignatureSet::arrange(&set(), [entry(2), entry(2)]),
            Err(ThresholdSignatureError::DuplicateSigner(Address::repeat_byte(2)))
        );
    }

    #[test]
    fn test_insert_grows() {
        let mut sigs = SignatureSet::default();
        sigs.insert(2, entry(1));
        assert_eq!(sigs.len(), 3);
        assert_eq!(sigs.signed_count(), 1);
    }
}
