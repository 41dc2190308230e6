//! Lynx Direct Staking
//!
//! This crate provides the two stateful contracts of Lynx direct staking,
//! written as precompiles with a typed Rust API and an ABI entry point.
//!
//! # Architecture
//!
//! A stake request flows through the gateway in one all-or-nothing step:
//! 1. The oracle's EIP-712 signature over the request is checked and consumed
//! 2. One 32 ETH deposit per validator is forwarded to the deposit contract
//! 3. The claim address joins the rewards vault with the staked amount
//!
//! The vault realizes incoming execution-layer rewards lazily and splits them
//! between pool members by share, minus a manager fee.
//!
//! # Example
//!
//! ```rust,ignore
//! use lynx_staking::*;
//!
//! let config = StakingConfig::load(path)?;
//! let ledger = Arc::new(InMemoryLedger::new());
//! let vault = Arc::new(RewardsVault::from_config(&config, ledger)?);
//! let deposit_contract = Arc::new(InMemoryDepositContract::new(DEPOSIT_CONTRACT));
//! let gateway = DirectStaking::from_config(&config, deposit_contract, vault.clone())?;
//!
//! let registered = gateway.stake(caller, value, &StakeRequest::new(params, oracle_sig))?;
//! ```

#![deny(unsafe_code)]

pub mod access;
pub mod config;
pub mod deposit_contract;
pub mod error;
pub mod events;
pub mod ledger;
pub mod precompiles;

// Re-export main types for convenience
pub use access::{AccessControl, ReentrancyGuard, Role};
pub use config::{StakingConfig, FEE_SHARE_DENOMINATOR, LYNX_CONFIG_ENV};
pub use deposit_contract::{
    deposit_value, DepositContract, ForwardedDeposit, InMemoryDepositContract,
};
pub use error::{Result, StakingError};
pub use events::{EventLog, StakingEvent};
pub use ledger::{InMemoryLedger, ValueTransfer};
pub use precompiles::gateway::{IDirectStaking, MAX_BATCH_SIZE};
pub use precompiles::vault::IRewardsVault;
pub use precompiles::{
    DirectStaking, GatewayState, PoolMember, RewardsVault, StakeRequest, ValidatorRecord,
    VaultState, MULTIPLIER,
};

// Re-export commonly used external types
pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use lynx_crypto::StakeParams;
