//! Secp256k1 signature recovery and oracle signing.
//!
//! Stake requests carry a 65-byte `r ‖ s ‖ v` signature over an EIP-712
//! digest. Recovery follows the contract-side rules:
//! - exactly 65 bytes, compact 64-byte signatures are rejected
//! - `v` is 27 or 28
//! - `s` is in the lower half of the group order
//!
//! Uses the k256 crate for secp256k1 curve operations.

use crate::error::CryptoError;
use alloy_primitives::{keccak256, uint, Address, B256, U256};
use k256::{
    ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use rand::{CryptoRng, RngCore};

/// Length of a recoverable signature (r || s || v).
pub const SIGNATURE_LENGTH: usize = 65;

/// Half of the secp256k1 group order.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Derive the EVM address of a verifying key.
///
/// Uses keccak256(uncompressed_pubkey[1..])[12..] (Ethereum address format, 20 bytes)
pub fn evm_address(key: &VerifyingKey) -> Address {
    let public_key = k256::PublicKey::from(key);
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 prefix byte
    let hash = keccak256(&encoded.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Recoverable ECDSA signature (65 bytes: r || s || v).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature([u8; SIGNATURE_LENGTH]);

impl RecoverableSignature {
    /// Parse from a byte slice that must be exactly 65 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(raw))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// The `s` scalar as an integer.
    pub fn s(&self) -> U256 {
        U256::from_be_slice(&self.0[32..64])
    }

    /// The recovery byte.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Recover the signer address for a 32-byte prehashed digest.
    pub fn recover(&self, digest: &B256) -> Result<Address, CryptoError> {
        let v = self.v();
        if v != 27 && v != 28 {
            return Err(CryptoError::InvalidRecoveryId(v));
        }
        if self.s() > SECP256K1N_HALF {
            return Err(CryptoError::MalleableSignature);
        }

        let signature =
            K256Signature::from_slice(&self.0[..64]).map_err(|_| CryptoError::InvalidSignature)?;
        let recovery_id = RecoveryId::from_byte(v - 27).ok_or(CryptoError::InvalidRecoveryId(v))?;

        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(evm_address(&key))
    }
}

impl std::fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecoverableSignature({})", hex::encode(&self.0[..8]))
    }
}

impl std::fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Oracle signing key.
///
/// Off-chain counterpart of the gateway's authorization check: signs stake
/// digests with low-s, `v ∈ {27, 28}` signatures.
#[derive(Clone)]
pub struct OracleSigner {
    key: SigningKey,
}

impl OracleSigner {
    /// Generate a new random signer
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self {
            key: SigningKey::random(rng),
        }
    }

    /// Load from raw bytes (32 bytes scalar)
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        SigningKey::from_slice(bytes)
            .map(|key| Self { key })
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Load from a hex string, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))
            .map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidLength {
                field: "secret key",
                expected: 32,
                actual: bytes.len(),
            })?;
        Self::from_bytes(&arr)
    }

    /// EVM address of this signer.
    pub fn address(&self) -> Address {
        evm_address(self.key.verifying_key())
    }

    /// Sign a 32-byte prehashed digest.
    pub fn sign_digest(&self, digest: &B256) -> Result<RecoverableSignature, CryptoError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|_| CryptoError::SigningFailed)?;

        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..64].copy_from_slice(&signature.to_bytes());
        raw[64] = 27 + recovery_id.to_byte();
        Ok(RecoverableSignature(raw))
    }
}

impl std::fmt::Debug for OracleSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleSigner")
            .field("address", &self.address())
            .field("key", &"[REDACTED]")
            .finish()
    }
}
