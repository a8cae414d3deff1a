//! Bridge types shared by the state machine and offline tooling.
//!
//! This crate contains the bridge identifier, the checkpoint and batch
//! commitment encodings validators sign, deposit and withdrawal-batch types,
//! and the events emitted by committed transitions.

mod batch;
mod bridge_id;
mod checkpoint;
pub mod codec;
mod deposit;
mod errors;
mod events;

pub use batch::{BatchTransaction, WithdrawalBatch};
pub use bridge_id::BridgeId;
pub use checkpoint::Checkpoint;
pub use deposit::{DepositRecord, DestinationAddress, MAX_DESTINATION_LEN};
pub use errors::CodecError;
pub use events::{
    filter_by_event_nonce, AdminChanged, BridgeEvent, SendToCosmosEvent,
    TransactionBatchExecutedEvent, Upgraded, ValsetUpdatedEvent,
};
// Re-export the validator set types so dependents need not name the crypto crate.
pub use gantry_crypto::threshold_signature::{
    PowerThreshold, SignatureEntry, SignatureSet, Validator, ValidatorSet,
};
