//! Events emitted by committed bridge transitions.

use alloy_primitives::{Address, LogData, B256, U256};
use alloy_sol_types::{sol, SolEvent};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{CodecError, DepositRecord, DestinationAddress};

sol! {
    event SendToCosmosEvent(
        address indexed tokenContract,
        address indexed sender,
        bytes32 indexed destination,
        uint256 amount,
        uint256 eventNonce,
    );

    event ValsetUpdatedEvent(
        uint256 indexed newValsetNonce,
        bytes32 checkpoint,
    );

    event TransactionBatchExecutedEvent(
        uint256 indexed batchNonce,
        address indexed token,
    );

    event AdminChanged(address previousAdmin, address newAdmin);

    /// Emitted with the implementation version now in effect.
    event Upgraded(uint64 indexed version);
}

/// An event produced by exactly one successful bridge call.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
pub enum BridgeEvent {
    Deposit(DepositRecord),
    ValidatorSetUpdated { checkpoint: B256, nonce: u64 },
    BatchExecuted { token: Address, batch_nonce: u64 },
    AdminChanged { previous: Address, new: Address },
    Upgraded { version: u64 },
}

impl BridgeEvent {
    /// Solidity event name, for logs and tooling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deposit(_) => SendToCosmosEvent::SIGNATURE,
            Self::ValidatorSetUpdated { .. } => ValsetUpdatedEvent::SIGNATURE,
            Self::BatchExecuted { .. } => TransactionBatchExecutedEvent::SIGNATURE,
            Self::AdminChanged { .. } => AdminChanged::SIGNATURE,
            Self::Upgraded { .. } => Upgraded::SIGNATURE,
        }
    }

    /// ABI log encoding (topics and data) as relayers observe it.
    pub fn to_log_data(&self) -> LogData {
        match self {
            Self::Deposit(record) => SendToCosmosEvent {
                tokenContract: record.token(),
                sender: record.sender(),
                destination: record.destination().to_bytes32(),
                amount: record.amount(),
                eventNonce: U256::from(record.event_nonce()),
            }
            .encode_log_data(),
            Self::ValidatorSetUpdated { checkpoint, nonce } => ValsetUpdatedEvent {
                newValsetNonce: U256::from(*nonce),
                checkpoint: *checkpoint,
            }
            .encode_log_data(),
            Self::BatchExecuted { token, batch_nonce } => TransactionBatchExecutedEvent {
                batchNonce: U256::from(*batch_nonce),
                token: *token,
            }
            .encode_log_data(),
            Self::AdminChanged { previous, new } => AdminChanged {
                previousAdmin: *previous,
                newAdmin: *new,
            }
            .encode_log_data(),
            Self::Upgraded { version } => Upgraded { version: *version }.encode_log_data(),
        }
    }
}

impl BridgeEvent {
    /// Decodes a log emitted by the bridge, dispatching on its first topic.
    ///
    /// Deposit destinations are logged left-padded to 32 bytes, so leading
    /// zero bytes of the original destination are not recovered.
    pub fn from_log_data(log: &LogData) -> Result<Self, CodecError> {
        let topic0 = log.topics().first().copied();
        match topic0 {
            Some(t) if t == SendToCosmosEvent::SIGNATURE_HASH => {
                let ev = decode::<SendToCosmosEvent>(log)?;
                let destination = DestinationAddress::from_bytes32(&ev.destination)?;
                Ok(Self::Deposit(DepositRecord::new(
                    ev.tokenContract,
                    ev.sender,
                    destination,
                    ev.amount,
                    nonce_to_u64(ev.eventNonce)?,
                )))
            }
            Some(t) if t == ValsetUpdatedEvent::SIGNATURE_HASH => {
                let ev = decode::<ValsetUpdatedEvent>(log)?;
                Ok(Self::ValidatorSetUpdated {
                    checkpoint: ev.checkpoint,
                    nonce: nonce_to_u64(ev.newValsetNonce)?,
                })
            }
            Some(t) if t == TransactionBatchExecutedEvent::SIGNATURE_HASH => {
                let ev = decode::<TransactionBatchExecutedEvent>(log)?;
                Ok(Self::BatchExecuted {
                    token: ev.token,
                    batch_nonce: nonce_to_u64(ev.batchNonce)?,
                })
            }
            Some(t) if t == AdminChanged::SIGNATURE_HASH => {
                let ev = decode::<AdminChanged>(log)?;
                Ok(Self::AdminChanged {
                    previous: ev.previousAdmin,
                    new: ev.newAdmin,
                })
            }
            Some(t) if t == Upgraded::SIGNATURE_HASH => {
                let ev = decode::<Upgraded>(log)?;
                Ok(Self::Upgraded {
                    version: ev.version,
                })
            }
            other => Err(CodecError::UnknownEvent(other)),
        }
    }

    /// Decodes every log, failing on the first one that is not a bridge event.
    pub fn from_logs<'a>(
        logs: impl IntoIterator<Item = &'a LogData>,
    ) -> Result<Vec<Self>, CodecError> {
        logs.into_iter().map(Self::from_log_data).collect()
    }

    /// Event nonce of a deposit, `None` for every other event.
    pub fn event_nonce(&self) -> Option<u64> {
        match self {
            Self::Deposit(record) => Some(record.event_nonce()),
            _ => None,
        }
    }
}

/// Deposits with an event nonce greater than `last_seen`, in input order.
///
/// Consumers on the validator chain track the last event nonce they applied
/// and use this to pick up only newer deposits.
pub fn filter_by_event_nonce(last_seen: u64, events: &[BridgeEvent]) -> Vec<DepositRecord> {
    events
        .iter()
        .filter_map(|ev| match ev {
            BridgeEvent::Deposit(record) if record.event_nonce() > last_seen => {
                Some(record.clone())
            }
            _ => None,
        })
        .collect()
}

fn decode<E: SolEvent>(log: &LogData) -> Result<E, CodecError> {
    E::decode_log_data(log).map_err(|e| CodecError::MalformedLog {
        event: E::SIGNATURE,
        reason: e.to_string(),
    })
}

fn nonce_to_u64(nonce: U256) -> Result<u64, CodecError> {
    u64::try_from(nonce).map_err(|_| CodecError::NonceOutOfRange(nonce))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{keccak256, Bytes};

    use super::*;

    fn deposit(nonce: u64) -> DepositRecord {
        DepositRecord::new(
            Address::repeat_byte(0xaa),
            Address::repeat_byte(0xbb),
            DestinationAddress::try_new(vec![0xcc; 20]).unwrap(),
            U256::from(1000),
            nonce,
        )
    }

    #[test]
    fn test_deposit_log_layout() {
        let log = BridgeEvent::Deposit(deposit(1)).to_log_data();
        let topics = log.topics();

        assert_eq!(topics.len(), 4);
        assert_eq!(
            topics[0],
            keccak256("SendToCosmosEvent(address,address,bytes32,uint256,uint256)")
        );
        assert_eq!(topics[1], Address::repeat_byte(0xaa).into_word());
        assert_eq!(&topics[3][..12], &[0u8; 12]);

        // Data holds the amount then the event nonce.
        assert_eq!(log.data.len(), 64);
        assert_eq!(U256::from_be_slice(&log.data[..32]), U256::from(1000));
        assert_eq!(U256::from_be_slice(&log.data[32..]), U256::from(1));
    }

    #[test]
    fn test_admin_changed_unindexed() {
        let log = BridgeEvent::AdminChanged {
            previous: Address::repeat_byte(1),
            new: Address::repeat_byte(2),
        }
        .to_log_data();
        assert_eq!(log.topics().len(), 1);
        assert_eq!(log.data.len(), 64);
    }

    #[test]
    fn test_every_event_decodes_from_its_log() {
        let events = [
            BridgeEvent::Deposit(deposit(7)),
            BridgeEvent::ValidatorSetUpdated {
                checkpoint: B256::repeat_byte(0x42),
                nonce: 3,
            },
            BridgeEvent::BatchExecuted {
                token: Address::repeat_byte(0xee),
                batch_nonce: 9,
            },
            BridgeEvent::AdminChanged {
                previous: Address::repeat_byte(1),
                new: Address::repeat_byte(2),
            },
            BridgeEvent::Upgraded { version: 2 },
        ];
        for event in events {
            let decoded = BridgeEvent::from_log_data(&event.to_log_data()).unwrap();
            assert_eq!(decoded, event);
        }
    }

    #[test]
    fn test_from_logs_keeps_order() {
        let events = vec![
            BridgeEvent::Deposit(deposit(1)),
            BridgeEvent::Upgraded { version: 2 },
            BridgeEvent::Deposit(deposit(2)),
        ];
        let logs: Vec<LogData> = events.iter().map(BridgeEvent::to_log_data).collect();
        assert_eq!(BridgeEvent::from_logs(&logs).unwrap(), events);
    }

    #[test]
    fn test_unknown_signature_rejected() {
        let log = BridgeEvent::Upgraded { version: 2 }.to_log_data();
        let bogus = keccak256("Upgraded(uint256)");
        let mut topics = log.topics().to_vec();
        topics[0] = bogus;
        let log = LogData::new_unchecked(topics, log.data.clone());
        assert_eq!(
            BridgeEvent::from_log_data(&log),
            Err(CodecError::UnknownEvent(Some(bogus)))
        );

        let empty = LogData::new_unchecked(vec![], Default::default());
        assert_eq!(
            BridgeEvent::from_log_data(&empty),
            Err(CodecError::UnknownEvent(None))
        );
    }

    #[test]
    fn test_truncated_log_rejected() {
        let log = BridgeEvent::Deposit(deposit(1)).to_log_data();
        let data = Bytes::copy_from_slice(&log.data[..32]);
        let truncated = LogData::new_unchecked(log.topics().to_vec(), data);
        assert!(matches!(
            BridgeEvent::from_log_data(&truncated),
            Err(CodecError::MalformedLog { .. })
        ));
    }

    #[test]
    fn test_oversized_nonce_rejected() {
        let log = ValsetUpdatedEvent {
            newValsetNonce: U256::MAX,
            checkpoint: B256::ZERO,
        }
        .encode_log_data();
        assert_eq!(
            BridgeEvent::from_log_data(&log),
            Err(CodecError::NonceOutOfRange(U256::MAX))
        );
    }

    #[test]
    fn test_filter_by_event_nonce() {
        let events = [
            BridgeEvent::Deposit(deposit(1)),
            BridgeEvent::ValidatorSetUpdated {
                checkpoint: B256::ZERO,
                nonce: 4,
            },
            BridgeEvent::Deposit(deposit(2)),
            BridgeEvent::Deposit(deposit(3)),
        ];
        let fresh = filter_by_event_nonce(1, &events);
        let nonces: Vec<u64> = fresh.iter().map(DepositRecord::event_nonce).collect();
        assert_eq!(nonces, vec![2, 3]);
        assert!(filter_by_event_nonce(3, &events).is_empty());
        assert_eq!(events[1].event_nonce(), None);
    }

    #[test]
    fn test_names() {
        let ev = BridgeEvent::Upgraded { version: 2 };
        assert_eq!(ev.name(), "Upgraded(uint64)");
        assert_eq!(ev.to_log_data().topics()[1], B256::with_last_byte(2));
    }
}
