use alloy_primitives::{B256, U256};
use gantry_crypto::threshold_signature::ThresholdSignatureError;
use thiserror::Error;

/// Errors raised while building or encoding bridge types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// An address was not 20 bytes long.
    #[error("invalid address length at index {index}: {len} bytes")]
    InvalidAddressLength { index: usize, len: usize },

    #[error("invalid bridge id length: {0} bytes (max 32)")]
    InvalidBridgeIdLength(usize),

    #[error("invalid bridge id: {0}")]
    InvalidBridgeIdHex(String),

    #[error("bridge id must be non-zero")]
    ZeroBridgeId,

    #[error("address and power arrays differ: {addresses} addresses, {powers} powers")]
    ValidatorArrayMismatch { addresses: usize, powers: usize },

    #[error(
        "batch arrays differ: {amounts} amounts, {destinations} destinations, {fees} fees"
    )]
    BatchArrayMismatch {
        amounts: usize,
        destinations: usize,
        fees: usize,
    },

    /// Destination must be 1 to 32 bytes.
    #[error("invalid destination length: {0} bytes")]
    InvalidDestination(usize),

    #[error("batch has no transactions")]
    EmptyBatch,

    #[error("batch total overflows")]
    AmountOverflow,

    /// The first topic matches no bridge event.
    #[error("unknown event signature: {0:?}")]
    UnknownEvent(Option<B256>),

    #[error("malformed {event} log: {reason}")]
    MalformedLog { event: &'static str, reason: String },

    /// A logged nonce does not fit in `u64`.
    #[error("nonce out of range: {0}")]
    NonceOutOfRange(U256),

    #[error(transparent)]
    ValidatorSet(#[from] ThresholdSignatureError),
}
