//! Power-weighted threshold signatures.
//!
//! A [`ValidatorSet`] is an ordered list of validators with voting power. A
//! message is authorized when validators holding at least the configured
//! [`PowerThreshold`] of total power have signed it, with signatures supplied
//! positionally in a [`SignatureSet`].

mod config;
mod errors;
mod signature;
mod verification;

pub use config::{
    PowerThreshold, Validator, ValidatorSet, DEFAULT_POWER_THRESHOLD, POWER_THRESHOLD_DENOMINATOR,
};
pub use errors::ThresholdSignatureError;
pub use signature::{SignatureEntry, SignatureSet};
pub use verification::verify_threshold_signatures;
