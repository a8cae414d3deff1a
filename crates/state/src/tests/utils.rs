use alloy_primitives::{Address, U256};
use gantry_bridge_types::{
    BatchTransaction, BridgeId, Checkpoint, DepositRecord, SignatureSet, WithdrawalBatch,
};
use gantry_crypto::test_utils::TestValidators;

use crate::{Bridge, BridgeError, InMemoryCustody, TokenCustody};

pub(super) const TOKEN: Address = Address::repeat_byte(0xee);
pub(super) const OTHER_TOKEN: Address = Address::repeat_byte(0xef);
pub(super) const ADMIN: Address = Address::repeat_byte(0xad);
pub(super) const BRIDGE_ACCOUNT: Address = Address::repeat_byte(0xb0);
pub(super) const USER: Address = Address::repeat_byte(0x11);
pub(super) const RELAYER: Address = Address::repeat_byte(0x22);
pub(super) const THRESHOLD: u32 = 6_666;

/// Starting balance of [`USER`] in both tokens.
pub(super) const USER_FUNDS: u64 = 1_000_000;

pub(super) fn bridge_id() -> BridgeId {
    BridgeId::from_name("foo").unwrap()
}

pub(super) fn destination() -> Vec<u8> {
    vec![0xcc; 20]
}

pub(super) fn uninitialized_bridge() -> Bridge<InMemoryCustody> {
    let mut custody = InMemoryCustody::new();
    custody.mint(TOKEN, USER, U256::from(USER_FUNDS)).unwrap();
    custody
        .mint(OTHER_TOKEN, USER, U256::from(USER_FUNDS))
        .unwrap();
    Bridge::new(BRIDGE_ACCOUNT, ADMIN, custody)
}

/// An initialized bridge and the keys of its genesis validators.
pub(super) struct Harness {
    pub(super) bridge: Bridge<InMemoryCustody>,
    pub(super) validators: TestValidators,
}

impl Harness {
    pub(super) fn new(powers: &[u64]) -> Self {
        let validators = TestValidators::new(powers);
        let mut bridge = uninitialized_bridge();
        bridge
            .initialize(
                bridge_id(),
                THRESHOLD,
                &validators.addresses(),
                &validators.powers(),
            )
            .unwrap();
        Self { bridge, validators }
    }

    /// Four validators of equal power.
    pub(super) fn equal_four() -> Self {
        Self::new(&[2500, 2500, 2500, 2500])
    }

    pub(super) fn balance(&self, token: Address, holder: Address) -> U256 {
        self.bridge.custody().balance_of(token, holder)
    }

    pub(super) fn deposit(&mut self, token: Address, amount: u64) -> Result<DepositRecord, BridgeError> {
        self.bridge
            .send_to_cosmos(USER, token, &destination(), U256::from(amount))
    }

    /// Signs a rotation to `next` at `nonce` with the current validators at
    /// `signers`.
    pub(super) fn sign_rotation(&self, next: &TestValidators, nonce: u64, signers: &[usize]) -> SignatureSet {
        let digest = Checkpoint::compute(bridge_id(), next.set(), nonce).signing_digest();
        self.validators.sign(&digest, signers)
    }
}

pub(super) fn tx(dest: u8, amount: u64, fee: u64) -> BatchTransaction {
    BatchTransaction::new(Address::repeat_byte(dest), U256::from(amount), U256::from(fee))
}

pub(super) fn batch(token: Address, txs: Vec<BatchTransaction>, nonce: u64) -> WithdrawalBatch {
    WithdrawalBatch::try_new(token, txs, nonce).unwrap()
}

pub(super) fn sign_batch(signers: &TestValidators, batch: &WithdrawalBatch, indices: &[usize]) -> SignatureSet {
    signers.sign(&batch.signing_digest(&bridge_id()), indices)
}
