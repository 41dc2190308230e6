//! Deposit-data root construction for the canonical Ethereum deposit contract.
//!
//! The deposit contract recomputes the SSZ root of `DepositData` with a fixed
//! tree of SHA-256 nodes and rejects any call whose `deposit_data_root` does
//! not match. The construction here reproduces that tree byte for byte:
//!
//! ```text
//! root
//! ├── sha256(pubkey_root ‖ withdrawal_credentials)
//! │   └── pubkey_root = sha256(pubkey ‖ 0^16)
//! └── sha256(amount_le ‖ 0^24 ‖ signature_root)
//!     └── signature_root = sha256(sha256(sig[0..64]) ‖ sha256(sig[64..96] ‖ 0^32))
//! ```

use crate::error::CryptoError;
use crate::hash::{sha256, sha256_concat};
use alloy_primitives::{Address, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};

/// BLS12-381 public key length.
pub const PUBKEY_LENGTH: usize = 48;

/// BLS12-381 signature length.
pub const DEPOSIT_SIGNATURE_LENGTH: usize = 96;

/// One gwei in wei.
pub const GWEI: u64 = 1_000_000_000;

/// Stake required per validator, in gwei (32 ETH).
pub const DEPOSIT_AMOUNT_GWEI: u64 = 32_000_000_000;

/// Withdrawal credential prefix for execution-layer (eth1 address) withdrawals.
pub const ETH1_ADDRESS_WITHDRAWAL_PREFIX: u8 = 0x01;

/// Validator public key as submitted to the deposit contract.
pub type BlsPubkey = FixedBytes<PUBKEY_LENGTH>;

/// Deposit signature as submitted to the deposit contract.
pub type BlsSignature = FixedBytes<DEPOSIT_SIGNATURE_LENGTH>;

/// Encode a u64 as 8 little-endian bytes.
pub fn little_endian_64(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Build execution-layer withdrawal credentials: `0x01 ‖ 0^11 ‖ address`.
pub fn withdrawal_credentials(withdrawal_address: &Address) -> B256 {
    let mut credentials = [0u8; 32];
    credentials[0] = ETH1_ADDRESS_WITHDRAWAL_PREFIX;
    credentials[12..].copy_from_slice(withdrawal_address.as_slice());
    B256::from(credentials)
}

/// Convert a wei amount to gwei, rejecting fractions of a gwei and overflow.
pub fn wei_to_gwei(wei: U256) -> Result<u64, CryptoError> {
    let gwei = U256::from(GWEI);
    if !(wei % gwei).is_zero() {
        return Err(CryptoError::InvalidGweiAmount(wei.to_string()));
    }
    u64::try_from(wei / gwei).map_err(|_| CryptoError::InvalidGweiAmount(wei.to_string()))
}

/// Compute the `deposit_data_root` the deposit contract expects.
///
/// `amount_le` is the deposit amount in gwei, little-endian encoded.
pub fn compute_deposit_root(
    pubkey: &BlsPubkey,
    signature: &BlsSignature,
    withdrawal_credentials: &B256,
    amount_le: [u8; 8],
) -> B256 {
    let pubkey_root = sha256_concat(pubkey.as_slice(), &[0u8; 16]);

    let signature_root = sha256_concat(
        sha256(&signature[..64]).as_slice(),
        sha256_concat(&signature[64..], &[0u8; 32]).as_slice(),
    );

    let mut amount_chunk = [0u8; 32];
    amount_chunk[..8].copy_from_slice(&amount_le);

    sha256_concat(
        sha256_concat(pubkey_root.as_slice(), withdrawal_credentials.as_slice()).as_slice(),
        sha256_concat(&amount_chunk, signature_root.as_slice()).as_slice(),
    )
}

/// Deposit payload forwarded to the deposit contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositData {
    /// Validator BLS public key.
    pub pubkey: BlsPubkey,
    /// Withdrawal credentials (see [`withdrawal_credentials`]).
    pub withdrawal_credentials: B256,
    /// Amount in gwei.
    pub amount_gwei: u64,
    /// BLS signature over the deposit message.
    pub signature: BlsSignature,
}

impl DepositData {
    /// Build deposit data from raw byte slices, checking field lengths.
    pub fn from_slices(
        pubkey: &[u8],
        withdrawal_credentials: B256,
        amount_gwei: u64,
        signature: &[u8],
    ) -> Result<Self, CryptoError> {
        if pubkey.len() != PUBKEY_LENGTH {
            return Err(CryptoError::InvalidLength {
                field: "pubkey",
                expected: PUBKEY_LENGTH,
                actual: pubkey.len(),
            });
        }
        if signature.len() != DEPOSIT_SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidLength {
                field: "signature",
                expected: DEPOSIT_SIGNATURE_LENGTH,
                actual: signature.len(),
            });
        }

        Ok(Self {
            pubkey: BlsPubkey::from_slice(pubkey),
            withdrawal_credentials,
            amount_gwei,
            signature: BlsSignature::from_slice(signature),
        })
    }

    /// The deposit data root for this payload.
    pub fn root(&self) -> B256 {
        compute_deposit_root(
            &self.pubkey,
            &self.signature,
            &self.withdrawal_credentials,
            little_endian_64(self.amount_gwei),
        )
    }
}
