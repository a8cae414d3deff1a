//! EVM-style account addresses derived from secp256k1 public keys.

use alloy_primitives::{eip191_hash_message, keccak256, Address, B256};
use secp256k1::PublicKey;

/// Derives the 20-byte address of a public key.
///
/// The address is the last 20 bytes of the keccak-256 hash of the uncompressed
/// key with its leading `0x04` tag removed.
pub fn eth_address(pubkey: &PublicKey) -> Address {
    let uncompressed = pubkey.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}

/// Hashes a 32-byte commitment the way wallets do for `personal_sign`.
///
/// Validators never sign the raw checkpoint or batch commitment; they sign
/// `keccak256("\x19Ethereum Signed Message:\n32" || commitment)`.
pub fn eth_signed_message_hash(commitment: &B256) -> B256 {
    eip191_hash_message(commitment)
}
