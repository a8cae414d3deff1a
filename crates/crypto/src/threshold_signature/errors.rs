//! Error types for threshold signature operations.

use alloy_primitives::Address;
use thiserror::Error;

use crate::signature::RecoveryError;

/// Errors that can occur while building validator sets or verifying
/// threshold signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdSignatureError {
    /// A validator set must have at least one member.
    #[error("validator set is empty")]
    EmptyValidatorSet,

    /// The same address appears more than once in a validator set.
    #[error("duplicate validator: {0}")]
    DuplicateValidator(Address),

    #[error("validator at index {index} has the zero address")]
    ZeroAddress { index: usize },

    #[error("validator at index {index} has zero power")]
    ZeroPower { index: usize },

    /// Sum of validator powers does not fit in a `u64`.
    #[error("total validator power overflows")]
    PowerOverflow,

    /// Address and power arrays have different lengths.
    #[error("parallel array mismatch: {addresses} addresses, {powers} powers")]
    ParallelArrayMismatch { addresses: usize, powers: usize },

    /// Threshold outside `1..=10_000` basis points.
    #[error("invalid power threshold: {0} basis points")]
    InvalidThreshold(u32),

    /// Signature slots do not line up one-to-one with the validator set.
    #[error("signature count mismatch: provided {provided}, expected {expected}")]
    LengthMismatch { provided: usize, expected: usize },

    /// A signature is attributed to, or was produced by, a validator at a
    /// different position.
    #[error("signature at index {index} belongs to {found}, expected {expected}")]
    OrderMismatch {
        index: usize,
        expected: Address,
        found: Address,
    },

    /// Signature does not recover to any member of the validator set.
    #[error("invalid signature at index {index}")]
    InvalidSignature { index: usize },

    /// Signature bytes could not be parsed or recovered.
    #[error("malformed signature at index {index}: {source}")]
    MalformedSignature {
        index: usize,
        #[source]
        source: RecoveryError,
    },

    /// Valid signatures do not carry enough power.
    #[error("insufficient power: signed {signed} of {total}, threshold {threshold} bps")]
    InsufficientPower {
        signed: u64,
        total: u64,
        threshold: u32,
    },

    /// Signer is not part of the validator set.
    #[error("unknown signer: {0}")]
    UnknownSigner(Address),

    /// Signer provided more than one signature.
    #[error("duplicate signer: {0}")]
    DuplicateSigner(Address),
}
