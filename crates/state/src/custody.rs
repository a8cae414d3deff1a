//! Token balances held on behalf of accounts.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CustodyError {
    #[error("insufficient {token} balance for {holder}: available {available}, required {required}")]
    InsufficientBalance {
        token: Address,
        holder: Address,
        available: U256,
        required: U256,
    },

    #[error("{token} balance overflow for {holder}")]
    BalanceOverflow { token: Address, holder: Address },

    #[error("transfer of {token} to the zero address")]
    ZeroRecipient { token: Address },
}

/// Token ledger the bridge moves funds through.
///
/// Implementations are cloned to stage a call; the bridge keeps the clone only
/// if the whole call succeeds.
pub trait TokenCustody: Clone {
    fn balance_of(&self, token: Address, holder: Address) -> U256;

    /// Moves `amount` of `token` from `from` to `to`.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), CustodyError>;
}

/// Token balances kept in memory, keyed by `(token, holder)`.
#[derive(Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct InMemoryCustody {
    balances: BTreeMap<(Address, Address), U256>,
}

impl InMemoryCustody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `token` to `holder` out of thin air.
    pub fn mint(&mut self, token: Address, holder: Address, amount: U256) -> Result<(), CustodyError> {
        let balance = self.balances.entry((token, holder)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(CustodyError::BalanceOverflow { token, holder })?;
        Ok(())
    }
}

impl TokenCustody for InMemoryCustody {
    fn balance_of(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), CustodyError> {
        if to.is_zero() {
            return Err(CustodyError::ZeroRecipient { token });
        }

        let available = self.balance_of(token, from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(CustodyError::InsufficientBalance {
                token,
                holder: from,
                available,
                required: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or(CustodyError::BalanceOverflow { token, holder: to })?;

        self.balances.insert((token, from), remaining);
        self.balances.insert((token, to), credited);
        Ok(())
    }
}
