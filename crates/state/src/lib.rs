//! Bridge state machine.
//!
//! Holds the trusted validator set and the nonce counters, and applies the
//! bridge's entry points as all-or-nothing transitions:
//!
//! - `registry`: the trusted checkpoint and validator set
//! - `rotation`: validator set rotation authorized by the outgoing set
//! - `deposit`: outbound deposits and the event nonce
//! - `batch`: withdrawal batch execution and per-token batch nonces
//! - `gate`: the admin/upgrade boundary selecting the active implementation
//! - `bridge`: entry points, staging and event emission

mod batch;
mod bridge;
mod custody;
mod deposit;
mod errors;
mod gate;
mod registry;
mod rotation;
mod shared;

pub use batch::BatchExecutor;
pub use bridge::{Bridge, BridgeState};
pub use custody::{CustodyError, InMemoryCustody, TokenCustody};
pub use deposit::DepositLedger;
pub use errors::{BridgeError, ErrorKind};
pub use gate::{AdminGate, EntryPoint, ImplVersion, UPGRADE_PROBE_RESPONSE};
pub use registry::ValidatorSetRegistry;
pub use rotation::rotate_validator_set;
pub use shared::SharedBridge;

#[cfg(test)]
mod tests;
