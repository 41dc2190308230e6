//! Events surfaced to external observers.
//!
//! Each contract records its events in an [`EventLog`]; the host drains them
//! after the call completes.

use alloy_primitives::{Address, U256};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Observable state transitions of the gateway and the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum StakingEvent {
    /// A batch stake completed.
    Staked { caller: Address, value: U256 },
    /// The oracle address changed.
    OracleChanged { oracle: Address },
    /// The vault address changed.
    VaultChanged { vault: Address },
    /// The deposit contract address changed.
    DepositContractChanged { deposit_contract: Address },
    /// A validator was queued for exit.
    ValidatorExited { id: u64, claim_address: Address },
    /// A member gained shares.
    PoolJoined { member: Address, amount: U256 },
    /// A member lost shares.
    PoolLeft { member: Address, amount: U256 },
    /// Rewards were paid out.
    RewardClaimed {
        member: Address,
        beneficiary: Address,
        amount: U256,
    },
    /// Manager revenue was paid out.
    ManagerRevenueWithdrawn { to: Address, amount: U256 },
    /// The manager fee share changed (thousandths).
    ManagerFeeShareChanged { milli: U256 },
    /// State-mutating entry points switched off.
    Paused { account: Address },
    /// State-mutating entry points switched back on.
    Unpaused { account: Address },
}

/// Append-only event buffer.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<StakingEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event.
    pub fn emit(&self, event: StakingEvent) {
        tracing::trace!(?event, "Event emitted");
        self.events.lock().push(event);
    }

    /// Record several events in order.
    pub fn emit_all(&self, events: impl IntoIterator<Item = StakingEvent>) {
        self.events.lock().extend(events);
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&self) -> Vec<StakingEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Copy of the recorded events.
    pub fn snapshot(&self) -> Vec<StakingEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events are recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}
