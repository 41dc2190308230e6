//! Hashing utilities.

use alloy_primitives::B256;
use sha2::{Digest, Sha256};

/// SHA-256 of a byte string.
pub fn sha256(data: &[u8]) -> B256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    B256::from(<[u8; 32]>::from(hasher.finalize()))
}

/// SHA-256 of the concatenation of two byte strings.
///
/// Every node of the deposit-data tree is built this way.
pub fn sha256_concat(left: &[u8], right: &[u8]) -> B256 {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    B256::from(<[u8; 32]>::from(hasher.finalize()))
}
