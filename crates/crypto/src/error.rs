//! Cryptographic error types

use thiserror::Error;

/// Errors raised while parsing or producing key and signature material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid secret key bytes
    #[error("invalid secret key bytes")]
    InvalidSecretKey,

    /// Signature is not exactly 65 bytes (r || s || v)
    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Signature scalars could not be parsed
    #[error("invalid signature bytes")]
    InvalidSignature,

    /// Recovery byte is not 27 or 28
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// `s` lies in the upper half of the curve order
    #[error("malleable signature: s is in the upper half order")]
    MalleableSignature,

    /// Public key recovery failed for the given digest
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// Signing a digest failed
    #[error("signing failed")]
    SigningFailed,

    /// Fixed-size field had the wrong length
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the field being parsed
        field: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Amount in wei is not a whole number of gwei or overflows u64 gwei
    #[error("amount {0} wei is not representable in gwei")]
    InvalidGweiAmount(String),

    /// Hex decoding failed
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
