//! Recoverable ECDSA signatures in the `r || s || v` layout.

use alloy_primitives::{Address, B256};
use borsh::{BorshDeserialize, BorshSerialize};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, SECP256K1,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::eth_address;

/// Length of a serialized signature: 32-byte `r`, 32-byte `s`, 1-byte `v`.
pub const SIGNATURE_LEN: usize = 65;

/// Errors that can occur while recovering a signer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    /// The encoded signature was not 65 bytes long.
    #[error("invalid signature length: expected {SIGNATURE_LEN}, got {0}")]
    InvalidLength(usize),

    /// The `v` byte was not one of 0, 1, 27 or 28.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// `r` or `s` is out of range for the curve.
    #[error("malformed signature")]
    MalformedSignature,

    /// No public key could be recovered for the digest.
    #[error("signature is unrecoverable")]
    Unrecoverable,
}

/// A recoverable ECDSA signature over a 32-byte digest.
///
/// `v` is stored as received. Both the raw recovery id (0/1) and the
/// offset form (27/28) are accepted when recovering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct EthSignature {
    r: B256,
    s: B256,
    v: u8,
}

impl EthSignature {
    pub fn new(r: B256, s: B256, v: u8) -> Self {
        Self { r, s, v }
    }

    pub fn from_bytes(bytes: &[u8; SIGNATURE_LEN]) -> Self {
        Self {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        }
    }

    /// Parses a signature from an arbitrary byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecoveryError> {
        let bytes: &[u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| RecoveryError::InvalidLength(bytes.len()))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    pub fn r(&self) -> B256 {
        self.r
    }

    pub fn s(&self) -> B256 {
        self.s
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    /// Normalizes `v` into a secp256k1 recovery id.
    pub fn recovery_id(&self) -> Result<RecoveryId, RecoveryError> {
        let raw = match self.v {
            0 | 1 => self.v,
            27 | 28 => self.v - 27,
            other => return Err(RecoveryError::InvalidRecoveryId(other)),
        };
        RecoveryId::from_i32(raw as i32).map_err(|_| RecoveryError::InvalidRecoveryId(self.v))
    }

    fn compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(self.r.as_slice());
        compact[32..].copy_from_slice(self.s.as_slice());
        compact
    }
}

/// Recovers the address that produced `signature` over `digest`.
///
/// The digest is used as-is; callers pass the already-prefixed signing hash.
pub fn recover_signer(digest: &B256, signature: &EthSignature) -> Result<Address, RecoveryError> {
    let recovery_id = signature.recovery_id()?;
    let recoverable = RecoverableSignature::from_compact(&signature.compact(), recovery_id)
        .map_err(|_| RecoveryError::MalformedSignature)?;

    let message = Message::from_digest(digest.0);
    let pubkey = SECP256K1
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| RecoveryError::Unrecoverable)?;

    Ok(eth_address(&pubkey))
}
