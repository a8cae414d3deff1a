use alloy_primitives::{Address, B256};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

use crate::{
    address::eth_address,
    signature::EthSignature,
    threshold_signature::{SignatureEntry, SignatureSet, Validator, ValidatorSet},
};

/// Deterministic secret key whose scalar is `index + 1`.
pub fn secret_key(index: u64) -> SecretKey {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&(index + 1).to_be_bytes());
    SecretKey::from_slice(&bytes).expect("scalar is non-zero and below the curve order")
}

pub fn address_of(sk: &SecretKey) -> Address {
    eth_address(&PublicKey::from_secret_key(SECP256K1, sk))
}

/// Signs `digest` as-is, producing a signature with `v` in `{27, 28}`.
pub fn sign_digest(sk: &SecretKey, digest: &B256) -> EthSignature {
    let sig = SECP256K1.sign_ecdsa_recoverable(&Message::from_digest(digest.0), sk);
    let (recovery_id, compact) = sig.serialize_compact();
    let mut bytes = [0u8; 65];
    bytes[..64].copy_from_slice(&compact);
    bytes[64] = recovery_id.to_i32() as u8 + 27;
    EthSignature::from_bytes(&bytes)
}

/// A validator set backed by known secret keys.
#[derive(Debug, Clone)]
pub struct TestValidators {
    keys: Vec<SecretKey>,
    set: ValidatorSet,
}

impl TestValidators {
    /// Builds a set with one validator per entry in `powers`.
    pub fn new(powers: &[u64]) -> Self {
        Self::with_offset(0, powers)
    }

    /// Like [`Self::new`], drawing keys starting at `offset` so that sets built
    /// with disjoint offsets share no members.
    pub fn with_offset(offset: u64, powers: &[u64]) -> Self {
        let keys: Vec<SecretKey> = (0..powers.len() as u64)
            .map(|i| secret_key(offset + i))
            .collect();
        let validators = keys
            .iter()
            .zip(powers)
            .map(|(sk, power)| Validator::new(address_of(sk), *power))
            .collect();
        let set = ValidatorSet::try_new(validators).expect("valid test validator set");
        Self { keys, set }
    }

    pub fn set(&self) -> &ValidatorSet {
        &self.set
    }

    pub fn secret_keys(&self) -> &[SecretKey] {
        &self.keys
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.set.addresses()
    }

    pub fn powers(&self) -> Vec<u64> {
        self.set.powers()
    }

    /// Signs `digest` with the validators at `signers`, leaving every other
    /// slot empty.
    pub fn sign(&self, digest: &B256, signers: &[usize]) -> SignatureSet {
        let mut sigs = SignatureSet::abstaining(self.keys.len());
        for &index in signers {
            let entry = SignatureEntry::new(
                self.set.validators()[index].address,
                sign_digest(&self.keys[index], digest),
            );
            sigs.insert(index, entry);
        }
        sigs
    }

    pub fn sign_all(&self, digest: &B256) -> SignatureSet {
        let all: Vec<usize> = (0..self.keys.len()).collect();
        self.sign(digest, &all)
    }
}
