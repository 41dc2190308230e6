//! The canonical Ethereum deposit contract, as seen by the gateway.
//!
//! The gateway forwards one call per validator:
//! `deposit(pubkey, withdrawal_credentials, signature, deposit_data_root)`
//! with exactly 32 ETH attached.

use crate::error::{Result, StakingError};
use alloy_primitives::{Address, B256, U256};
use lynx_crypto::{DepositData, DEPOSIT_AMOUNT_GWEI, GWEI};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Wei attached to every forwarded deposit (32 ETH).
pub fn deposit_value() -> U256 {
    U256::from(DEPOSIT_AMOUNT_GWEI) * U256::from(GWEI)
}

/// Interface of the external deposit contract.
///
/// Forwarding is split into a side-effect-free [`check`](Self::check) and an
/// infallible [`record`](Self::record), so a batch is validated in full
/// before any element is recorded.
pub trait DepositContract: Send + Sync {
    /// Address of the contract.
    fn address(&self) -> Address;

    /// Validate one deposit with `value` wei attached without recording it.
    fn check(&self, data: &DepositData, deposit_data_root: B256, value: U256) -> Result<()>;

    /// Record a deposit that passed [`check`](Self::check).
    fn record(&self, data: &DepositData, deposit_data_root: B256, value: U256);

    /// Forward one deposit with `value` wei attached.
    fn deposit(&self, data: &DepositData, deposit_data_root: B256, value: U256) -> Result<()> {
        self.check(data, deposit_data_root, value)?;
        self.record(data, deposit_data_root, value);
        Ok(())
    }

    /// Forward a batch of deposits, each with `value` wei attached.
    ///
    /// All-or-nothing: a rejected element leaves no deposit behind.
    fn deposit_batch(&self, deposits: &[(DepositData, B256)], value: U256) -> Result<()> {
        for (index, (data, root)) in deposits.iter().enumerate() {
            self.check(data, *root, value)
                .inspect_err(|e| tracing::debug!(index, error = %e, "Deposit batch rejected"))?;
        }
        for (data, root) in deposits {
            self.record(data, *root, value);
        }
        Ok(())
    }
}

/// A deposit accepted by [`InMemoryDepositContract`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardedDeposit {
    /// Payload as submitted.
    pub data: DepositData,
    /// Root supplied by the caller.
    pub deposit_data_root: B256,
    /// Wei attached.
    pub value: U256,
}

/// Deposit contract that checks calls the way the canonical one does and
/// records what it accepted.
#[derive(Debug)]
pub struct InMemoryDepositContract {
    address: Address,
    deposits: Mutex<Vec<ForwardedDeposit>>,
}

impl InMemoryDepositContract {
    /// Create an empty contract at `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            deposits: Mutex::new(Vec::new()),
        }
    }

    /// Deposits accepted so far.
    pub fn deposits(&self) -> Vec<ForwardedDeposit> {
        self.deposits.lock().clone()
    }

    /// Number of deposits accepted so far.
    pub fn deposit_count(&self) -> usize {
        self.deposits.lock().len()
    }

    /// Total wei received.
    pub fn total_value(&self) -> U256 {
        self.deposits
            .lock()
            .iter()
            .fold(U256::ZERO, |acc, d| acc + d.value)
    }

    fn validate(data: &DepositData, deposit_data_root: B256, value: U256) -> Result<()> {
        if value != deposit_value() {
            return Err(StakingError::deposit(format!(
                "deposit value {value} is not 32 ETH"
            )));
        }
        if data.amount_gwei != DEPOSIT_AMOUNT_GWEI {
            return Err(StakingError::deposit(format!(
                "deposit amount {} gwei does not match attached value",
                data.amount_gwei
            )));
        }
        let expected = data.root();
        if expected != deposit_data_root {
            return Err(StakingError::deposit(format!(
                "reconstructed DepositData does not match supplied deposit_data_root \
                 (expected {expected}, got {deposit_data_root})"
            )));
        }
        Ok(())
    }
}

impl DepositContract for InMemoryDepositContract {
    fn address(&self) -> Address {
        self.address
    }

    fn check(&self, data: &DepositData, deposit_data_root: B256, value: U256) -> Result<()> {
        Self::validate(data, deposit_data_root, value)
    }

    fn record(&self, data: &DepositData, deposit_data_root: B256, value: U256) {
        let mut deposits = self.deposits.lock();
        tracing::debug!(
            index = deposits.len(),
            pubkey = %data.pubkey,
            root = %deposit_data_root,
            "Deposit accepted"
        );
        deposits.push(ForwardedDeposit {
            data: data.clone(),
            deposit_data_root,
            value,
        });
    }
}
