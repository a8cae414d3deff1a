//! Bridge entry points.

use std::mem;

use alloy_primitives::{Address, B256, U256};
use borsh::{BorshDeserialize, BorshSerialize};
use gantry_bridge_types::{
    BatchTransaction, BridgeEvent, BridgeId, Checkpoint, DepositRecord, DestinationAddress,
    PowerThreshold, SignatureSet, ValidatorSet, WithdrawalBatch,
};
use tracing::info;

use crate::{
    rotate_validator_set, AdminGate, BatchExecutor, BridgeError, DepositLedger, EntryPoint,
    ImplVersion, TokenCustody, ValidatorSetRegistry, UPGRADE_PROBE_RESPONSE,
};

/// Everything an initialized bridge persists.
#[derive(Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct BridgeState {
    registry: ValidatorSetRegistry,
    deposits: DepositLedger,
    batches: BatchExecutor,
}

impl BridgeState {
    pub fn new(registry: ValidatorSetRegistry) -> Self {
        Self {
            registry,
            deposits: DepositLedger::new(),
            batches: BatchExecutor::new(),
        }
    }

    pub fn registry(&self) -> &ValidatorSetRegistry {
        &self.registry
    }

    pub fn deposits(&self) -> &DepositLedger {
        &self.deposits
    }

    pub fn batches(&self) -> &BatchExecutor {
        &self.batches
    }

    /// Re-checks the invariants established at initialization.
    pub fn validate_invariants(&self) -> Result<(), BridgeError> {
        self.registry.check_consistency()
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut ValidatorSetRegistry {
        &mut self.registry
    }
}

/// The bridge: admin gate, persisted state and token custody.
///
/// Every mutating entry point runs against a staged copy of the state and the
/// custody ledger, and commits both only if the whole call succeeds. A failed
/// call leaves the bridge exactly as it was. A successful call appends exactly
/// one event to the event log.
///
/// Staging clones the custody value on every call, so `C` should be cheap to
/// clone. [`InMemoryCustody`](crate::InMemoryCustody) copies its whole balance
/// map and is meant for tests and tooling. The event log is held in memory
/// until a consumer calls [`Bridge::take_events`].
#[derive(Clone, Debug)]
pub struct Bridge<C> {
    /// Address holding locked tokens.
    account: Address,
    gate: AdminGate,
    state: Option<BridgeState>,
    custody: C,
    events: Vec<BridgeEvent>,
}

impl<C: TokenCustody> Bridge<C> {
    /// Creates an uninitialized bridge holding funds at `account`.
    pub fn new(account: Address, admin: Address, custody: C) -> Self {
        Self {
            account,
            gate: AdminGate::new(admin),
            state: None,
            custody,
            events: Vec::new(),
        }
    }

    fn state(&self) -> Result<&BridgeState, BridgeError> {
        self.state.as_ref().ok_or(BridgeError::NotInitialized)
    }

    fn emit(&mut self, event: BridgeEvent) {
        self.events.push(event);
    }

    /// Runs `f` against staged copies of the state and custody, committing
    /// them and emitting the returned event only on success.
    fn transact<T>(
        &mut self,
        entry_point: EntryPoint,
        f: impl FnOnce(&mut BridgeState, &mut C, Address) -> Result<(T, BridgeEvent), BridgeError>,
    ) -> Result<T, BridgeError> {
        self.gate.ensure_supported(entry_point)?;
        let mut staged_state = self.state()?.clone();
        let mut staged_custody = self.custody.clone();

        let (output, event) = f(&mut staged_state, &mut staged_custody, self.account)?;

        self.state = Some(staged_state);
        self.custody = staged_custody;
        self.emit(event);
        Ok(output)
    }

    /// Sets up the genesis validator set. Can only succeed once.
    pub fn initialize(
        &mut self,
        bridge_id: BridgeId,
        power_threshold: u32,
        addresses: &[Address],
        powers: &[u64],
    ) -> Result<Checkpoint, BridgeError> {
        self.gate.ensure_supported(EntryPoint::Initialize)?;
        if self.state.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }

        let power_threshold = PowerThreshold::try_new(power_threshold)?;
        let validators = ValidatorSet::try_from_parts(addresses, powers)?;
        let registry = ValidatorSetRegistry::genesis(bridge_id, power_threshold, validators);
        let checkpoint = *registry.checkpoint();

        info!(
            %bridge_id,
            power_threshold = power_threshold.get(),
            validators = addresses.len(),
            total_power = registry.total_power(),
            checkpoint = %checkpoint.commitment(),
            "initialized bridge"
        );
        self.state = Some(BridgeState::new(registry));
        self.emit(BridgeEvent::ValidatorSetUpdated {
            checkpoint: checkpoint.commitment(),
            nonce: checkpoint.nonce(),
        });
        Ok(checkpoint)
    }

    /// Locks `amount` of `token` from `sender` and records a deposit for
    /// `destination` on the validator chain.
    pub fn send_to_cosmos(
        &mut self,
        sender: Address,
        token: Address,
        destination: &[u8],
        amount: U256,
    ) -> Result<DepositRecord, BridgeError> {
        self.transact(EntryPoint::SendToCosmos, |state, custody, account| {
            let destination = DestinationAddress::try_new(destination.to_vec())?;
            if amount.is_zero() {
                return Err(BridgeError::ZeroAmount);
            }
            // A transfer to itself would lock nothing.
            if sender == account {
                return Err(BridgeError::SelfDeposit(sender));
            }
            custody.transfer(token, sender, account, amount)?;
            let record = state.deposits.record(token, sender, destination, amount)?;
            Ok((record.clone(), BridgeEvent::Deposit(record)))
        })
    }

    /// Rotates to a new validator set signed by the current one.
    pub fn update_validator_set(
        &mut self,
        new_addresses: &[Address],
        new_powers: &[u64],
        new_nonce: u64,
        signatures: &SignatureSet,
    ) -> Result<Checkpoint, BridgeError> {
        self.transact(EntryPoint::UpdateValidatorSet, |state, _, _| {
            let new_validators = ValidatorSet::try_from_parts(new_addresses, new_powers)?;
            let checkpoint =
                rotate_validator_set(&mut state.registry, new_validators, new_nonce, signatures)?;
            let event = BridgeEvent::ValidatorSetUpdated {
                checkpoint: checkpoint.commitment(),
                nonce: checkpoint.nonce(),
            };
            Ok((checkpoint, event))
        })
    }

    /// Executes a withdrawal batch for `token_contract`, paying fees to
    /// `relayer`.
    pub fn submit_batch(
        &mut self,
        relayer: Address,
        token_contract: Address,
        transactions: Vec<BatchTransaction>,
        batch_nonce: u64,
        signatures: &SignatureSet,
    ) -> Result<(), BridgeError> {
        let batch = WithdrawalBatch::try_new(token_contract, transactions, batch_nonce)?;
        self.execute_batch(relayer, &batch, signatures)
    }

    /// Executes an already assembled withdrawal batch.
    pub fn execute_batch(
        &mut self,
        relayer: Address,
        batch: &WithdrawalBatch,
        signatures: &SignatureSet,
    ) -> Result<(), BridgeError> {
        self.transact(EntryPoint::SubmitBatch, |state, custody, account| {
            state.batches.execute(
                &state.registry,
                batch,
                signatures,
                custody,
                account,
                relayer,
            )?;
            let event = BridgeEvent::BatchExecuted {
                token: batch.token_contract(),
                batch_nonce: batch.batch_nonce(),
            };
            Ok(((), event))
        })
    }

    pub fn change_admin(&mut self, caller: Address, new_admin: Address) -> Result<(), BridgeError> {
        let previous = self.gate.change_admin(caller, new_admin)?;
        self.emit(BridgeEvent::AdminChanged {
            previous,
            new: new_admin,
        });
        Ok(())
    }

    /// Switches implementation, then re-validates the stored state under it.
    /// The switch is undone if re-validation fails.
    pub fn upgrade_to(&mut self, caller: Address, version: ImplVersion) -> Result<(), BridgeError> {
        let mut staged = self.gate.clone();
        staged.upgrade_to(caller, version)?;
        if let Some(state) = &self.state {
            state.validate_invariants()?;
        }

        info!(from = ?self.gate.implementation(), to = ?version, "upgraded implementation");
        self.gate = staged;
        self.emit(BridgeEvent::Upgraded {
            version: version.number(),
        });
        Ok(())
    }

    /// Only available from [`ImplVersion::V2`].
    pub fn upgrade_probe(&self) -> Result<&'static str, BridgeError> {
        self.gate.ensure_supported(EntryPoint::UpgradeProbe)?;
        Ok(UPGRADE_PROBE_RESPONSE)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn checkpoint(&self) -> Result<B256, BridgeError> {
        Ok(self.state()?.registry.checkpoint().commitment())
    }

    pub fn valset_nonce(&self) -> Result<u64, BridgeError> {
        Ok(self.state()?.registry.nonce())
    }

    pub fn total_power(&self) -> Result<u64, BridgeError> {
        Ok(self.state()?.registry.total_power())
    }

    pub fn power_threshold(&self) -> Result<PowerThreshold, BridgeError> {
        Ok(self.state()?.registry.power_threshold())
    }

    pub fn bridge_id(&self) -> Result<BridgeId, BridgeError> {
        Ok(self.state()?.registry.bridge_id())
    }

    pub fn validators(&self) -> Result<&ValidatorSet, BridgeError> {
        Ok(self.state()?.registry.validators())
    }

    pub fn last_event_nonce(&self) -> Result<u64, BridgeError> {
        Ok(self.state()?.deposits.last_event_nonce())
    }

    pub fn last_batch_nonce(&self, token: Address) -> Result<u64, BridgeError> {
        Ok(self.state()?.batches.last_batch_nonce(token))
    }

    pub fn bridge_state(&self) -> Option<&BridgeState> {
        self.state.as_ref()
    }

    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    /// Removes and returns all events emitted so far, in order.
    pub fn take_events(&mut self) -> Vec<BridgeEvent> {
        mem::take(&mut self.events)
    }

    pub fn admin(&self) -> Address {
        self.gate.admin()
    }

    pub fn implementation(&self) -> ImplVersion {
        self.gate.implementation()
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Mutable access to token balances, for funding accounts.
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> Option<&mut BridgeState> {
        self.state.as_mut()
    }
}
