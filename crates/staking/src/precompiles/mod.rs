//! Stateful precompiles for Lynx direct staking.
//!
//! - Direct staking gateway: oracle-authorized batch deposits and exits
//! - Rewards vault: proportional distribution of execution-layer rewards

pub mod gateway;
pub mod vault;

pub use gateway::{DirectStaking, GatewayState, StakeRequest, ValidatorRecord};
pub use vault::{PoolMember, RewardsVault, VaultState, MULTIPLIER};

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolInterface;
use revm::precompile::{PrecompileError, PrecompileOutput};

/// Fail with out-of-gas unless `gas_limit` covers `cost`.
pub(crate) fn charge(gas_limit: u64, cost: u64) -> Result<(), PrecompileError> {
    if gas_limit < cost {
        return Err(PrecompileError::Fatal("Out of gas".to_string()));
    }
    Ok(())
}

/// Decode call data (selector included) against an interface.
pub(crate) fn decode_calls<C: SolInterface>(input: &[u8]) -> Result<C, PrecompileError> {
    if input.len() < 4 {
        return Err(PrecompileError::Fatal("Input too short".to_string()));
    }
    C::abi_decode(input).map_err(|e| PrecompileError::Fatal(format!("Invalid call data: {e}")))
}

/// Successful output charging `gas_used`.
pub(crate) fn success(gas_used: u64, bytes: Bytes) -> PrecompileOutput {
    PrecompileOutput {
        gas_used,
        gas_refunded: 0,
        bytes,
        reverted: false,
    }
}

/// Lossy conversion for gauges.
pub(crate) fn to_f64(value: U256) -> f64 {
    value.saturating_to::<u128>() as f64
}
