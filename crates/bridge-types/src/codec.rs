//! Commitment encodings signed by validators.
//!
//! Both commitments are `keccak256` over the standard ABI encoding of their
//! fields, prefixed by the bridge id and a fixed method tag. The tag separates
//! checkpoint signatures from batch signatures, and the bridge id separates
//! deployments. Validators sign the prefixed digest returned by
//! [`signing_digest`], never the raw commitment.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use gantry_crypto::eth_signed_message_hash;

use crate::{BridgeId, CodecError, ValidatorSet, WithdrawalBatch};

/// Method tag for validator set checkpoints.
pub const CHECKPOINT_TAG: &[u8] = b"checkpoint";

/// Method tag for withdrawal batches.
pub const TRANSACTION_BATCH_TAG: &[u8] = b"transactionBatch";

fn method_tag(tag: &[u8]) -> B256 {
    B256::right_padding_from(tag)
}

fn powers_to_words(powers: &[u64]) -> Vec<U256> {
    powers.iter().map(|p| U256::from(*p)).collect()
}

/// ABI encoding hashed into a checkpoint commitment.
pub fn checkpoint_preimage(bridge_id: &BridgeId, validators: &ValidatorSet, nonce: u64) -> Vec<u8> {
    encode_checkpoint_fields(
        bridge_id.as_b256(),
        validators.addresses(),
        powers_to_words(&validators.powers()),
        nonce,
    )
}

/// Commits to a validator set, in order, at `nonce`.
pub fn compute_checkpoint(bridge_id: &BridgeId, validators: &ValidatorSet, nonce: u64) -> B256 {
    keccak256(checkpoint_preimage(bridge_id, validators, nonce))
}

/// Computes a checkpoint commitment from unvalidated raw inputs.
///
/// Accepts any array contents, including sets a [`ValidatorSet`] would
/// reject, so that tooling can reproduce commitments for arbitrary input.
///
/// # Errors
///
/// - `InvalidAddressLength` if an address is not 20 bytes
/// - `ValidatorArrayMismatch` if the arrays differ in length
/// - `InvalidBridgeIdLength` / `ZeroBridgeId` for a bad bridge id
pub fn compute_checkpoint_raw<A: AsRef<[u8]>>(
    bridge_id: &[u8],
    addresses: &[A],
    powers: &[u64],
    nonce: u64,
) -> Result<B256, CodecError> {
    let bridge_id = BridgeId::from_bytes(bridge_id)?;
    if addresses.len() != powers.len() {
        return Err(CodecError::ValidatorArrayMismatch {
            addresses: addresses.len(),
            powers: powers.len(),
        });
    }
    let addresses = addresses
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_address(index, raw.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(keccak256(encode_checkpoint_fields(
        bridge_id.as_b256(),
        addresses,
        powers_to_words(powers),
        nonce,
    )))
}

fn parse_address(index: usize, raw: &[u8]) -> Result<Address, CodecError> {
    let bytes: [u8; 20] = raw
        .try_into()
        .map_err(|_| CodecError::InvalidAddressLength {
            index,
            len: raw.len(),
        })?;
    Ok(Address::from(bytes))
}

fn encode_checkpoint_fields(
    bridge_id: B256,
    addresses: Vec<Address>,
    powers: Vec<U256>,
    nonce: u64,
) -> Vec<u8> {
    (
        bridge_id,
        method_tag(CHECKPOINT_TAG),
        U256::from(nonce),
        addresses,
        powers,
    )
        .abi_encode_params()
}

/// ABI encoding hashed into a batch commitment.
pub fn batch_preimage(bridge_id: &BridgeId, batch: &WithdrawalBatch) -> Vec<u8> {
    let txs = batch.transactions();
    let amounts: Vec<U256> = txs.iter().map(|tx| tx.amount).collect();
    let destinations: Vec<Address> = txs.iter().map(|tx| tx.destination).collect();
    let fees: Vec<U256> = txs.iter().map(|tx| tx.fee).collect();

    (
        bridge_id.as_b256(),
        method_tag(TRANSACTION_BATCH_TAG),
        amounts,
        destinations,
        fees,
        U256::from(batch.batch_nonce()),
        batch.token_contract(),
    )
        .abi_encode_params()
}

/// Commits to a withdrawal batch, covering every transaction in order, the
/// batch nonce and the token contract.
pub fn compute_batch_commitment(bridge_id: &BridgeId, batch: &WithdrawalBatch) -> B256 {
    keccak256(batch_preimage(bridge_id, batch))
}

/// The digest validators sign for a commitment.
pub fn signing_digest(commitment: &B256) -> B256 {
    eth_signed_message_hash(commitment)
}
