//! Positional verification of threshold signatures.

use alloy_primitives::B256;
use tracing::debug;

use super::{PowerThreshold, SignatureSet, ThresholdSignatureError, ValidatorSet};
use crate::signature::recover_signer;

/// Verifies that `signatures` over `digest` carry at least `threshold` of the
/// power in `validators`.
///
/// Slot `i` of `signatures` must either be empty or hold a signature by the
/// validator at position `i`. Empty slots contribute no power. Any present
/// signature that fails to authenticate its slot aborts verification; no
/// partial credit is given.
///
/// `digest` is the hash validators actually signed, i.e. the prefixed signing
/// hash of a checkpoint or batch commitment.
///
/// # Returns
///
/// The total power of the validators whose signatures were verified.
///
/// # Errors
///
/// - `LengthMismatch` if the slot count differs from the validator count
/// - `OrderMismatch` if a slot names, or was signed by, a validator at another
///   position
/// - `InvalidSignature` / `MalformedSignature` if a signature does not recover
///   to a member of the set
/// - `InsufficientPower` if the verified power is below the threshold
pub fn verify_threshold_signatures(
    validators: &ValidatorSet,
    threshold: PowerThreshold,
    signatures: &SignatureSet,
    digest: &B256,
) -> Result<u64, ThresholdSignatureError> {
    if signatures.len() != validators.len() {
        return Err(ThresholdSignatureError::LengthMismatch {
            provided: signatures.len(),
            expected: validators.len(),
        });
    }

    let mut signed_power: u64 = 0;
    for (index, (validator, slot)) in validators
        .validators()
        .iter()
        .zip(signatures.slots())
        .enumerate()
    {
        let Some(entry) = slot else {
            continue;
        };

        if entry.validator != validator.address {
            return Err(ThresholdSignatureError::OrderMismatch {
                index,
                expected: validator.address,
                found: entry.validator,
            });
        }

        let recovered = recover_signer(digest, &entry.signature)
            .map_err(|source| ThresholdSignatureError::MalformedSignature { index, source })?;

        if recovered != validator.address {
            if validators.contains(&recovered) {
                return Err(ThresholdSignatureError::OrderMismatch {
                    index,
                    expected: validator.address,
                    found: recovered,
                });
            }
            return Err(ThresholdSignatureError::InvalidSignature { index });
        }

        // Bounded by total power, which is known to fit.
        signed_power += validator.power;
    }

    let total = validators.total_power();
    debug!(%digest, signed_power, total, threshold = threshold.get(), "tallied signatures");

    if !threshold.is_met(signed_power, total) {
        return Err(ThresholdSignatureError::InsufficientPower {
            signed: signed_power,
            total,
            threshold: threshold.get(),
        });
    }

    Ok(signed_power)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        signature::EthSignature,
        test_utils::{sign_digest, TestValidators},
        threshold_signature::SignatureEntry,
    };

    const DIGEST: B256 = B256::repeat_byte(0xab);

    fn threshold() -> PowerThreshold {
        PowerThreshold::try_new(6_666).unwrap()
    }

    #[test]
    fn test_verify_success() {
        let vals = TestValidators::new(&[3333, 3333, 3334]);
        let sigs = vals.sign(&DIGEST, &[0, 2]);
        let power = verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST).unwrap();
        assert_eq!(power, 6667);
    }

    #[test]
    fn test_threshold_boundary() {
        let vals = TestValidators::new(&[6666, 1, 3333]);
        let exact = vals.sign(&DIGEST, &[0]);
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &exact, &DIGEST),
            Ok(6666)
        );

        let vals = TestValidators::new(&[6665, 2, 3333]);
        let short = vals.sign(&DIGEST, &[0]);
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &short, &DIGEST),
            Err(ThresholdSignatureError::InsufficientPower {
                signed: 6665,
                total: 10_000,
                threshold: 6_666,
            })
        );
    }

    #[test]
    fn test_all_abstain() {
        let vals = TestValidators::new(&[1, 1, 1]);
        let sigs = SignatureSet::abstaining(3);
        assert!(matches!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::InsufficientPower { signed: 0, .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let vals = TestValidators::new(&[1, 1, 1]);
        let sigs = SignatureSet::abstaining(2);
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::LengthMismatch {
                provided: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_signature_in_wrong_slot() {
        let vals = TestValidators::new(&[5000, 5000]);
        let sig0 = sign_digest(&vals.secret_keys()[0], &DIGEST);
        let addr0 = vals.set().validators()[0].address;
        let addr1 = vals.set().validators()[1].address;

        // Correctly attributed but placed at position 1.
        let mut sigs = SignatureSet::abstaining(2);
        sigs.insert(1, SignatureEntry::new(addr0, sig0));
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::OrderMismatch {
                index: 1,
                expected: addr1,
                found: addr0,
            })
        );

        // Claims to be validator 1 but was signed by validator 0.
        let mut sigs = SignatureSet::abstaining(2);
        sigs.insert(1, SignatureEntry::new(addr1, sig0));
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::OrderMismatch {
                index: 1,
                expected: addr1,
                found: addr0,
            })
        );

        // Same signature at the right position passes.
        let mut sigs = SignatureSet::abstaining(2);
        sigs.insert(0, SignatureEntry::new(addr0, sig0));
        sigs.insert(1, SignatureEntry::new(addr1, sign_digest(&vals.secret_keys()[1], &DIGEST)));
        assert!(verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST).is_ok());
    }

    #[test]
    fn test_signature_over_other_digest() {
        let vals = TestValidators::new(&[5000, 5000]);
        let sigs = vals.sign(&B256::repeat_byte(0xcd), &[0, 1]);
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::InvalidSignature { index: 0 })
        );
    }

    #[test]
    fn test_outsider_signature() {
        let vals = TestValidators::new(&[5000, 5000]);
        let outsider = TestValidators::with_offset(100, &[1]);
        let addr0 = vals.set().validators()[0].address;
        let mut sigs = SignatureSet::abstaining(2);
        sigs.insert(
            0,
            SignatureEntry::new(addr0, sign_digest(&outsider.secret_keys()[0], &DIGEST)),
        );
        assert_eq!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::InvalidSignature { index: 0 })
        );
    }

    #[test]
    fn test_invalid_signature_aborts_despite_enough_power() {
        // Validators 0 and 1 alone meet the threshold; a bad signature at 2
        // still fails the whole set.
        let vals = TestValidators::new(&[4000, 4000, 2000]);
        let mut sigs = vals.sign(&DIGEST, &[0, 1]);
        let addr2 = vals.set().validators()[2].address;
        sigs.insert(
            2,
            SignatureEntry::new(addr2, EthSignature::new(B256::ZERO, B256::ZERO, 27)),
        );
        assert!(matches!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::MalformedSignature { index: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_claimed_validator() {
        let vals = TestValidators::new(&[1, 1]);
        let mut sigs = vals.sign(&DIGEST, &[0, 1]);
        let stranger = Address::repeat_byte(0x77);
        let sig = sigs.slots()[0].unwrap().signature;
        sigs.insert(0, SignatureEntry::new(stranger, sig));
        assert!(matches!(
            verify_threshold_signatures(vals.set(), threshold(), &sigs, &DIGEST),
            Err(ThresholdSignatureError::OrderMismatch { index: 0, .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn proptest_signed_subset_decides_by_power(
            powers in prop::collection::vec(1u64..1_000, 1..6),
            mask in any::<u8>(),
            bps in 1u32..=10_000,
        ) {
            let vals = TestValidators::new(&powers);
            let signers: Vec<usize> = (0..powers.len()).filter(|i| mask & (1 << i) != 0).collect();
            let signed: u64 = signers.iter().map(|i| powers[*i]).sum();
            let total: u64 = powers.iter().sum();
            let threshold = PowerThreshold::try_new(bps).unwrap();

            let sigs = vals.sign(&DIGEST, &signers);
            let result = verify_threshold_signatures(vals.set(), threshold, &sigs, &DIGEST);
            if signed as u128 * 10_000 >= total as u128 * bps as u128 {
                prop_assert_eq!(result, Ok(signed));
            } else {
                let is_insufficient = matches!(
                    result,
                    Err(ThresholdSignatureError::InsufficientPower { .. })
                );
                prop_assert!(is_insufficient);
            }
        }
    }
}
