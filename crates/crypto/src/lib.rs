//! Cryptographic primitives for the bridge.
//!
//! Covers EVM address derivation, recovery of signers from recoverable ECDSA
//! signatures, and the positional power-threshold verifier used to authorize
//! validator set rotations and withdrawal batches.

pub mod address;
pub mod signature;
pub mod threshold_signature;

#[rustfmt::skip]
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use address::{eth_address, eth_signed_message_hash};
pub use signature::{recover_signer, EthSignature, RecoveryError};
