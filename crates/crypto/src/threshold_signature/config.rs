//! Validator sets and the power threshold they must meet.

use std::collections::HashSet;

use alloy_primitives::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::ThresholdSignatureError;

/// Denominator of [`PowerThreshold`]; thresholds are expressed in basis points.
pub const POWER_THRESHOLD_DENOMINATOR: u32 = 10_000;

/// Two thirds of total power, the threshold used by production deployments.
pub const DEFAULT_POWER_THRESHOLD: u32 = 6_666;

/// Fraction of total power, in basis points, required to authorize a message.
///
/// Always within `1..=10_000`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, BorshSerialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct PowerThreshold(u32);

impl PowerThreshold {
    pub fn try_new(basis_points: u32) -> Result<Self, ThresholdSignatureError> {
        if basis_points == 0 || basis_points > POWER_THRESHOLD_DENOMINATOR {
            return Err(ThresholdSignatureError::InvalidThreshold(basis_points));
        }
        Ok(Self(basis_points))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns whether `signed` out of `total` power meets the threshold.
    ///
    /// Evaluated as `signed * 10_000 >= total * threshold` in `u128`, so the
    /// comparison never rounds in favor of the signers and never overflows.
    pub fn is_met(&self, signed: u64, total: u64) -> bool {
        let lhs = signed as u128 * POWER_THRESHOLD_DENOMINATOR as u128;
        let rhs = total as u128 * self.0 as u128;
        lhs >= rhs
    }
}

impl Default for PowerThreshold {
    fn default() -> Self {
        Self(DEFAULT_POWER_THRESHOLD)
    }
}

impl TryFrom<u32> for PowerThreshold {
    type Error = ThresholdSignatureError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<PowerThreshold> for u32 {
    fn from(value: PowerThreshold) -> Self {
        value.0
    }
}

impl BorshDeserialize for PowerThreshold {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let raw = u32::deserialize_reader(reader)?;
        Self::try_new(raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

/// A single member of a validator set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Validator {
    pub address: Address,
    pub power: u64,
}

impl Validator {
    pub fn new(address: Address, power: u64) -> Self {
        Self { address, power }
    }
}

/// An ordered, validated set of validators.
///
/// Order is significant: signatures are matched to validators by position and
/// the checkpoint commitment covers the addresses and powers in this order.
/// Construction guarantees the set is non-empty, every address is unique and
/// non-zero, every power is non-zero, and the total power fits in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(try_from = "Vec<Validator>", into = "Vec<Validator>")]
pub struct ValidatorSet {
    validators: Vec<Validator>,
    #[borsh(skip)]
    total_power: u64,
}

impl ValidatorSet {
    /// Creates a validator set.
    ///
    /// # Errors
    ///
    /// - `EmptyValidatorSet` if `validators` is empty
    /// - `ZeroAddress` / `ZeroPower` for a member with a zero address or power
    /// - `DuplicateValidator` if an address appears more than once
    /// - `PowerOverflow` if the total power does not fit in a `u64`
    pub fn try_new(validators: Vec<Validator>) -> Result<Self, ThresholdSignatureError> {
        if validators.is_empty() {
            return Err(ThresholdSignatureError::EmptyValidatorSet);
        }

        let mut seen = HashSet::with_capacity(validators.len());
        let mut total_power: u64 = 0;
        for (index, validator) in validators.iter().enumerate() {
            if validator.address.is_zero() {
                return Err(ThresholdSignatureError::ZeroAddress { index });
            }
            if validator.power == 0 {
                return Err(ThresholdSignatureError::ZeroPower { index });
            }
            if !seen.insert(validator.address) {
                return Err(ThresholdSignatureError::DuplicateValidator(
                    validator.address,
                ));
            }
            total_power = total_power
                .checked_add(validator.power)
                .ok_or(ThresholdSignatureError::PowerOverflow)?;
        }

        Ok(Self {
            validators,
            total_power,
        })
    }

    /// Creates a validator set from parallel address and power arrays.
    pub fn try_from_parts(
        addresses: &[Address],
        powers: &[u64],
    ) -> Result<Self, ThresholdSignatureError> {
        if addresses.len() != powers.len() {
            return Err(ThresholdSignatureError::ParallelArrayMismatch {
                addresses: addresses.len(),
                powers: powers.len(),
            });
        }
        let validators = addresses
            .iter()
            .zip(powers)
            .map(|(address, power)| Validator::new(*address, *power))
            .collect();
        Self::try_new(validators)
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn get(&self, index: usize) -> Option<&Validator> {
        self.validators.get(index)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn total_power(&self) -> u64 {
        self.total_power
    }

    /// Position of `address` in the set, if it is a member.
    pub fn position_of(&self, address: &Address) -> Option<usize> {
        self.validators.iter().position(|v| &v.address == address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.position_of(address).is_some()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.validators.iter().map(|v| v.address).collect()
    }

    pub fn powers(&self) -> Vec<u64> {
        self.validators.iter().map(|v| v.power).collect()
    }
}

impl TryFrom<Vec<Validator>> for ValidatorSet {
    type Error = ThresholdSignatureError;

    fn try_from(value: Vec<Validator>) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ValidatorSet> for Vec<Validator> {
    fn from(value: ValidatorSet) -> Self {
        value.validators
    }
}

// Total power is derived, so deserialization rebuilds and revalidates the set.
impl BorshDeserialize for ValidatorSet {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let validators = Vec::<Validator>::deserialize_reader(reader)?;
        Self::try_new(validators)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}
