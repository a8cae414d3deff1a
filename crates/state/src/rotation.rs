use gantry_bridge_types::{Checkpoint, SignatureSet, ValidatorSet};
use tracing::{info, warn};

use crate::{BridgeError, ValidatorSetRegistry};

/// Replaces the trusted validator set with `new_validators` at `new_nonce`.
///
/// The new checkpoint must be signed by the *current* set; an incoming set
/// can never authorize itself. On success the checkpoint and set are replaced
/// together and the new checkpoint is returned. On failure `registry` is
/// untouched.
///
/// # Errors
///
/// - `StaleValsetNonce` if `new_nonce` is not greater than the current nonce
/// - threshold signature errors from verifying against the current set
pub fn rotate_validator_set(
    registry: &mut ValidatorSetRegistry,
    new_validators: ValidatorSet,
    new_nonce: u64,
    signatures: &SignatureSet,
) -> Result<Checkpoint, BridgeError> {
    let current = registry.nonce();
    if new_nonce <= current {
        warn!(new_nonce, current, "rejecting stale validator set update");
        return Err(BridgeError::StaleValsetNonce {
            provided: new_nonce,
            current,
        });
    }

    let checkpoint = Checkpoint::compute(registry.bridge_id(), &new_validators, new_nonce);
    let signed_power = registry.verify(signatures, &checkpoint.signing_digest())?;

    info!(
        nonce = new_nonce,
        checkpoint = %checkpoint.commitment(),
        validators = new_validators.len(),
        total_power = new_validators.total_power(),
        signed_power,
        "rotated validator set"
    );
    registry.replace(checkpoint, new_validators);

    Ok(checkpoint)
}
