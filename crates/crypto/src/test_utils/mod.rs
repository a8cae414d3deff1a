//! Deterministic keys and signing helpers for tests.

mod ecdsa;

pub use ecdsa::{address_of, secret_key, sign_digest, TestValidators};
