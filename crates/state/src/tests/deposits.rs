use alloy_primitives::{B256, U256};
use gantry_bridge_types::BridgeEvent;
use proptest::prelude::*;

use super::utils::*;
use crate::{BridgeError, ErrorKind};

#[test]
fn test_deposit_sequence() {
    let mut h = Harness::equal_four();

    let first = h.deposit(TOKEN, 1000).unwrap();
    assert_eq!(first.event_nonce(), 1);
    assert_eq!(h.balance(TOKEN, BRIDGE_ACCOUNT), U256::from(1000));

    let second = h.deposit(TOKEN, 1000).unwrap();
    assert_eq!(second.event_nonce(), 2);
    assert_eq!(h.balance(TOKEN, BRIDGE_ACCOUNT), U256::from(2000));
    assert_eq!(h.balance(TOKEN, USER), U256::from(USER_FUNDS - 2000));
    assert_eq!(h.bridge.last_event_nonce().unwrap(), 2);

    // Genesis valset event, then one event per deposit.
    let events = h.bridge.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2], BridgeEvent::Deposit(second));
}

#[test]
fn test_deposit_event_log() {
    let mut h = Harness::equal_four();
    let record = h.deposit(TOKEN, 1000).unwrap();
    let log = BridgeEvent::Deposit(record).to_log_data();
    let topics = log.topics();
    assert_eq!(topics[1], TOKEN.into_word());
    assert_eq!(topics[2], USER.into_word());
    assert_eq!(topics[3], B256::left_padding_from(&destination()));
}

#[test]
fn test_take_events_drains_log() {
    let mut h = Harness::equal_four();
    h.deposit(TOKEN, 1).unwrap();
    h.deposit(TOKEN, 2).unwrap();

    let drained = h.bridge.take_events();
    assert_eq!(drained.len(), 3);
    assert!(matches!(drained[0], BridgeEvent::ValidatorSetUpdated { nonce: 0, .. }));
    assert!(h.bridge.events().is_empty());

    // Nonces keep counting after the log is drained.
    let record = h.deposit(TOKEN, 3).unwrap();
    assert_eq!(record.event_nonce(), 3);
    assert_eq!(h.bridge.events(), &[BridgeEvent::Deposit(record)]);
}

#[test]
fn test_event_nonce_shared_across_tokens() {
    let mut h = Harness::equal_four();
    assert_eq!(h.deposit(TOKEN, 5).unwrap().event_nonce(), 1);
    assert_eq!(h.deposit(OTHER_TOKEN, 5).unwrap().event_nonce(), 2);
    assert_eq!(h.deposit(TOKEN, 5).unwrap().event_nonce(), 3);
}

#[test]
fn test_oversized_destination_rejected() {
    let mut h = Harness::equal_four();
    h.deposit(TOKEN, 10).unwrap();
    let events_before = h.bridge.events().len();

    let err = h
        .bridge
        .send_to_cosmos(USER, TOKEN, &[0xcc; 33], U256::from(10))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDestination);
    assert_eq!(h.bridge.last_event_nonce().unwrap(), 1);
    assert_eq!(h.balance(TOKEN, BRIDGE_ACCOUNT), U256::from(10));
    assert_eq!(h.bridge.events().len(), events_before);

    // The next valid deposit continues without a gap.
    assert_eq!(h.deposit(TOKEN, 10).unwrap().event_nonce(), 2);
}

#[test]
fn test_empty_destination_rejected() {
    let mut h = Harness::equal_four();
    let err = h
        .bridge
        .send_to_cosmos(USER, TOKEN, &[], U256::from(10))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDestination);
}

#[test]
fn test_deposit_without_funds() {
    let mut h = Harness::equal_four();
    let err = h.deposit(TOKEN, USER_FUNDS + 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExecutionFailure);
    assert_eq!(h.bridge.last_event_nonce().unwrap(), 0);
    assert_eq!(h.balance(TOKEN, USER), U256::from(USER_FUNDS));
}

#[test]
fn test_zero_deposit_rejected() {
    let mut h = Harness::equal_four();
    assert_eq!(h.deposit(TOKEN, 0), Err(BridgeError::ZeroAmount));
    assert_eq!(h.bridge.last_event_nonce().unwrap(), 0);
}

#[test]
fn test_bridge_account_cannot_deposit() {
    let mut h = Harness::equal_four();
    h.deposit(TOKEN, 1000).unwrap();
    let events_before = h.bridge.events().len();

    let err = h
        .bridge
        .send_to_cosmos(BRIDGE_ACCOUNT, TOKEN, &destination(), U256::from(1000))
        .unwrap_err();
    assert_eq!(err, BridgeError::SelfDeposit(BRIDGE_ACCOUNT));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(h.bridge.last_event_nonce().unwrap(), 1);
    assert_eq!(h.balance(TOKEN, BRIDGE_ACCOUNT), U256::from(1000));
    assert_eq!(h.bridge.events().len(), events_before);

    // Every recorded deposit is backed by locked funds.
    h.deposit(TOKEN, 1000).unwrap();
    assert_eq!(h.bridge.last_event_nonce().unwrap(), 2);
    assert_eq!(h.balance(TOKEN, BRIDGE_ACCOUNT), U256::from(2000));
}

#[test]
fn test_deposit_before_initialize() {
    let mut bridge = uninitialized_bridge();
    let err = bridge
        .send_to_cosmos(USER, TOKEN, &destination(), U256::from(1))
        .unwrap_err();
    assert_eq!(err, BridgeError::NotInitialized);
    assert_eq!(bridge.last_event_nonce(), Err(BridgeError::NotInitialized));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn proptest_event_nonce_counts_successes(amounts in prop::collection::vec(0u64..2_000, 1..20)) {
        let mut h = Harness::new(&[1]);
        let mut successes = 0u64;
        for amount in amounts {
            match h.deposit(TOKEN, amount) {
                Ok(record) => {
                    successes += 1;
                    prop_assert_eq!(record.event_nonce(), successes);
                }
                Err(e) => prop_assert_eq!(e, BridgeError::ZeroAmount),
            }
        }
        prop_assert_eq!(h.bridge.last_event_nonce().unwrap(), successes);
    }
}
