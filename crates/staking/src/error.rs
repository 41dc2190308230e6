//! Error types for the staking gateway and rewards vault.
//!
//! Every variant is a terminal abort of the call that produced it: no state
//! change persists once an entry point returns an error.

use alloy_primitives::{Address, U256};
use revm::precompile::PrecompileError;

/// Result type alias for staking operations.
pub type Result<T> = std::result::Result<T, StakingError>;

/// Main error type for the gateway and the vault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StakingError {
    /// The raw authorization signature was already consumed.
    #[error("REPLAYED_PARAMS")]
    ReplayedParams,

    /// More validators than a single request may carry.
    #[error("Batch too large: {count} validators, at most {max}")]
    BatchTooLarge { count: usize, max: usize },

    /// Pubkey and signature arrays differ in length.
    #[error("Length mismatch: {pubkeys} pubkeys, {signatures} signatures")]
    LengthMismatch { pubkeys: usize, signatures: usize },

    /// A required collaborator is not configured.
    #[error("Not configured: {0}")]
    NotConfigured(&'static str),

    /// The oracle did not sign these parameters.
    #[error("Signature mismatch: parameters not signed by the oracle")]
    SignatureMismatch,

    /// A zero address was supplied where a real one is required.
    #[error("Zero address: {0}")]
    ZeroAddress(&'static str),

    /// Tips larger than the attached value.
    #[error("Tips {tips} exceed attached value {value}")]
    TipsExceedValue { value: U256, tips: U256 },

    /// Staked value is not a whole number of 32 ETH deposits.
    #[error("Misaligned value: {0} wei is not a multiple of 32 ETH")]
    MisalignedValue(U256),

    /// Staked value does not cover exactly one deposit per validator.
    #[error("Validator count mismatch: value covers {covered} deposits, {requested} requested")]
    ValidatorCountMismatch { covered: U256, requested: usize },

    /// A validator pubkey is not 48 bytes.
    #[error("Invalid pubkey length at index {index}: {length} bytes")]
    InvalidPubkeyLength { index: usize, length: usize },

    /// A deposit signature is not 96 bytes.
    #[error("Invalid signature length at index {index}: {length} bytes")]
    InvalidSignatureLength { index: usize, length: usize },

    /// Leave amount larger than the member's shares.
    #[error("Insufficient shares: {member} holds {available}, requested {requested}")]
    InsufficientShares {
        member: Address,
        available: U256,
        requested: U256,
    },

    /// Claim amount larger than the member's reward balance.
    #[error("Insufficient reward: {available} available, requested {requested}")]
    InsufficientReward { available: U256, requested: U256 },

    /// Withdrawal larger than the manager revenue.
    #[error("Insufficient manager revenue: {available} available, requested {requested}")]
    InsufficientRevenue { available: U256, requested: U256 },

    /// Fee share outside 0..=1000.
    #[error("Manager fee share {0} out of range (max 1000)")]
    FeeShareOutOfRange(U256),

    /// The validator is already queued for exit.
    #[error("Validator {0} already exiting")]
    AlreadyExiting(u64),

    /// Only the claim address may exit its validator.
    #[error("Caller {caller} is not the claim address of validator {id}")]
    NotClaimAddress { id: u64, caller: Address },

    /// No validator with this index.
    #[error("Validator {0} not found")]
    ValidatorNotFound(u64),

    /// The contract is paused.
    #[error("Paused")]
    Paused,

    /// Caller lacks the role this entry point requires.
    #[error("Unauthorized: {caller} lacks role {role}")]
    Unauthorized { caller: Address, role: &'static str },

    /// A state-mutating entry point was re-entered.
    #[error("Reentrant call")]
    Reentrancy,

    /// The deposit contract rejected a forwarded deposit.
    #[error("Deposit failed: {0}")]
    DepositFailed(String),

    /// A native value transfer failed.
    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StakingError {
    /// Create a deposit failure.
    pub fn deposit(msg: impl Into<String>) -> Self {
        Self::DepositFailed(msg.into())
    }

    /// Create a transfer failure.
    pub fn transfer(msg: impl Into<String>) -> Self {
        Self::TransferFailed(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short label used as the `reason` of rejection metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ReplayedParams => "replayed_params",
            Self::BatchTooLarge { .. } => "batch_too_large",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::NotConfigured(_) => "not_configured",
            Self::SignatureMismatch => "signature_mismatch",
            Self::ZeroAddress(_) => "zero_address",
            Self::TipsExceedValue { .. } => "tips_exceed_value",
            Self::MisalignedValue(_) => "misaligned_value",
            Self::ValidatorCountMismatch { .. } => "validator_count_mismatch",
            Self::InvalidPubkeyLength { .. } => "invalid_pubkey_length",
            Self::InvalidSignatureLength { .. } => "invalid_signature_length",
            Self::InsufficientShares { .. } => "insufficient_shares",
            Self::InsufficientReward { .. } => "insufficient_reward",
            Self::InsufficientRevenue { .. } => "insufficient_revenue",
            Self::FeeShareOutOfRange(_) => "fee_share_out_of_range",
            Self::AlreadyExiting(_) => "already_exiting",
            Self::NotClaimAddress { .. } => "not_claim_address",
            Self::ValidatorNotFound(_) => "validator_not_found",
            Self::Paused => "paused",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Reentrancy => "reentrancy",
            Self::DepositFailed(_) => "deposit_failed",
            Self::TransferFailed(_) => "transfer_failed",
            Self::Config(_) => "config",
        }
    }
}

impl From<StakingError> for PrecompileError {
    fn from(err: StakingError) -> Self {
        PrecompileError::Fatal(err.to_string())
    }
}
