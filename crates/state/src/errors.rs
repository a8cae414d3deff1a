use alloy_primitives::Address;
use gantry_bridge_types::CodecError;
use gantry_crypto::threshold_signature::ThresholdSignatureError;
use thiserror::Error;

use crate::{custody::CustodyError, gate::EntryPoint, ImplVersion};

/// Coarse classification of a [`BridgeError`], stable across error variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    InvalidInput,
    /// Rotation or batch nonce not strictly greater than the stored value.
    StaleNonce,
    /// Signature list misaligned with the validator order.
    OrderMismatch,
    InvalidSignature,
    InsufficientPower,
    InvalidDestination,
    /// A disbursement step failed.
    ExecutionFailure,
    Unauthorized,
    NotInitialized,
    AlreadyInitialized,
    UnsupportedEntryPoint,
}

/// Errors returned by bridge entry points.
///
/// A call that returns an error has no effect on bridge state.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BridgeError {
    #[error("bridge is not initialized")]
    NotInitialized,

    #[error("bridge is already initialized")]
    AlreadyInitialized,

    /// The rotation nonce is not greater than the current validator set nonce.
    #[error("stale valset nonce: provided {provided}, current {current}")]
    StaleValsetNonce { provided: u64, current: u64 },

    /// The batch nonce is not greater than the last executed nonce for the token.
    #[error("stale batch nonce for {token}: provided {provided}, last executed {last}")]
    StaleBatchNonce {
        token: Address,
        provided: u64,
        last: u64,
    },

    #[error("deposit amount must be non-zero")]
    ZeroAmount,

    /// The bridge account cannot deposit into itself.
    #[error("deposit sender {0} is the bridge account")]
    SelfDeposit(Address),

    #[error("admin cannot be the zero address")]
    ZeroAdmin,

    #[error("event nonce exhausted")]
    NonceExhausted,

    #[error("caller {caller} is not the admin")]
    Unauthorized { caller: Address },

    #[error("entry point {entry_point:?} is not supported by {version:?}")]
    UnsupportedEntryPoint {
        entry_point: EntryPoint,
        version: ImplVersion,
    },

    /// Stored state failed revalidation.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    ThresholdSignature(#[from] ThresholdSignatureError),

    #[error("execution failed: {0}")]
    Custody(#[from] CustodyError),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized => ErrorKind::NotInitialized,
            Self::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            Self::StaleValsetNonce { .. } | Self::StaleBatchNonce { .. } => ErrorKind::StaleNonce,
            Self::ZeroAmount
            | Self::SelfDeposit(_)
            | Self::ZeroAdmin
            | Self::NonceExhausted
            | Self::InvariantViolation(_) => ErrorKind::InvalidInput,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::UnsupportedEntryPoint { .. } => ErrorKind::UnsupportedEntryPoint,
            Self::Codec(e) => codec_kind(e),
            Self::ThresholdSignature(e) => threshold_kind(e),
            Self::Custody(_) => ErrorKind::ExecutionFailure,
        }
    }
}

fn codec_kind(err: &CodecError) -> ErrorKind {
    match err {
        CodecError::InvalidDestination(_) => ErrorKind::InvalidDestination,
        CodecError::ValidatorSet(e) => threshold_kind(e),
        _ => ErrorKind::InvalidInput,
    }
}

fn threshold_kind(err: &ThresholdSignatureError) -> ErrorKind {
    match err {
        ThresholdSignatureError::OrderMismatch { .. } => ErrorKind::OrderMismatch,
        ThresholdSignatureError::InvalidSignature { .. }
        | ThresholdSignatureError::MalformedSignature { .. } => ErrorKind::InvalidSignature,
        ThresholdSignatureError::InsufficientPower { .. } => ErrorKind::InsufficientPower,
        _ => ErrorKind::InvalidInput,
    }
}
