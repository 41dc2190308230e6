//! Native value transfers out of a contract.

use crate::error::{Result, StakingError};
use alloy_primitives::{Address, U256};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// Host-provided native value transfer.
///
/// Implementations may call back into the paying contract; the contract's
/// single-entry guard is held for the duration of the call.
pub trait ValueTransfer: Send + Sync {
    /// Send `amount` wei to `to`.
    fn transfer(&self, to: Address, amount: U256) -> Result<()>;
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<Address, U256>,
    rejecting: HashSet<Address>,
}

/// In-memory recipient ledger.
///
/// Credits every transfer to the recipient; recipients marked with
/// [`InMemoryLedger::reject`] refuse incoming value.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wei received by `account`.
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.state
            .read()
            .balances
            .get(account)
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Total wei received by all accounts.
    pub fn total_transferred(&self) -> U256 {
        self.state
            .read()
            .balances
            .values()
            .fold(U256::ZERO, |acc, v| acc + *v)
    }

    /// Make `account` refuse incoming transfers.
    pub fn reject(&self, account: Address) {
        self.state.write().rejecting.insert(account);
    }

    /// Let `account` accept transfers again.
    pub fn accept(&self, account: &Address) {
        self.state.write().rejecting.remove(account);
    }
}

impl ValueTransfer for InMemoryLedger {
    fn transfer(&self, to: Address, amount: U256) -> Result<()> {
        let mut state = self.state.write();
        if state.rejecting.contains(&to) {
            return Err(StakingError::transfer(format!("{to} refused {amount} wei")));
        }
        *state.balances.entry(to).or_default() += amount;
        Ok(())
    }
}
