//! Cryptographic primitives for Lynx direct staking
//!
//! This crate provides:
//! - EIP-712 hashing of oracle-signed stake parameters
//! - Secp256k1 signer recovery and oracle signing
//! - Deposit-data root construction for the Ethereum deposit contract
//! - SHA-256 helpers

pub mod deposit;
pub mod eip712;
pub mod error;
pub mod hash;
pub mod secp256k1;

// Deposit exports
pub use deposit::{
    compute_deposit_root, little_endian_64, wei_to_gwei, withdrawal_credentials, BlsPubkey,
    BlsSignature, DepositData, DEPOSIT_AMOUNT_GWEI, DEPOSIT_SIGNATURE_LENGTH, GWEI,
    PUBKEY_LENGTH,
};

// EIP-712 exports
pub use eip712::{
    hash_domain, hash_stake_params, hash_to_sign, validate_authorization, StakeAuthorizer,
    StakeParams, DOMAIN_NAME, DOMAIN_VERSION,
};

// Secp256k1 exports
pub use secp256k1::{OracleSigner, RecoverableSignature, SIGNATURE_LENGTH};

// Error exports
pub use error::CryptoError;
