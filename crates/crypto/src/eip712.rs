//! EIP-712 typed-data hashing for oracle-authorized stake requests.
//!
//! The oracle signs `StakeParams` under the `LynxDirectStaking` domain. The
//! two `bytes[]` members are hashed element-wise and the concatenated hashes
//! hashed again, as EIP-712 prescribes for arrays of dynamic values.

use crate::secp256k1::RecoverableSignature;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Domain name of the staking gateway.
pub const DOMAIN_NAME: &str = "LynxDirectStaking";

/// Domain version of the staking gateway.
pub const DOMAIN_VERSION: &str = "1.0.0";

/// EIP-712 domain type string.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Stake parameters type string.
pub const STAKE_PARAMS_TYPE: &str = "StakeParams(uint256 extraData,address claimaddr,address withdrawaddr,bytes[] pubkeys,bytes[] signatures)";

/// Prefix of every EIP-712 signing payload.
const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

/// Type hash of the EIP-712 domain.
pub fn eip712_domain_typehash() -> B256 {
    keccak256(EIP712_DOMAIN_TYPE)
}

/// Type hash of `StakeParams`.
pub fn stake_params_typehash() -> B256 {
    keccak256(STAKE_PARAMS_TYPE)
}

/// Hash an EIP-712 domain with name, version, chain id and verifying contract.
pub fn hash_domain(name: &str, version: &str, chain_id: u64, verifying_contract: Address) -> B256 {
    let mut encoded = Vec::with_capacity(5 * 32);
    encoded.extend_from_slice(eip712_domain_typehash().as_slice());
    encoded.extend_from_slice(keccak256(name).as_slice());
    encoded.extend_from_slice(keccak256(version).as_slice());
    encoded.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    encoded.extend_from_slice(verifying_contract.into_word().as_slice());
    keccak256(encoded)
}

/// keccak256 over the concatenated keccak256 of each element.
fn hash_bytes_array<T: AsRef<[u8]>>(items: &[T]) -> B256 {
    let mut concatenated = Vec::with_capacity(items.len() * 32);
    for item in items {
        concatenated.extend_from_slice(keccak256(item.as_ref()).as_slice());
    }
    keccak256(concatenated)
}

/// Struct hash of a `StakeParams` message.
pub fn hash_stake_params<T: AsRef<[u8]>>(
    extra_data: U256,
    claim_addr: Address,
    withdraw_addr: Address,
    pubkeys: &[T],
    signatures: &[T],
) -> B256 {
    let mut encoded = Vec::with_capacity(6 * 32);
    encoded.extend_from_slice(stake_params_typehash().as_slice());
    encoded.extend_from_slice(&extra_data.to_be_bytes::<32>());
    encoded.extend_from_slice(claim_addr.into_word().as_slice());
    encoded.extend_from_slice(withdraw_addr.into_word().as_slice());
    encoded.extend_from_slice(hash_bytes_array(pubkeys).as_slice());
    encoded.extend_from_slice(hash_bytes_array(signatures).as_slice());
    keccak256(encoded)
}

/// The digest that is actually signed: `keccak256(0x1901 ‖ domain ‖ struct)`.
pub fn hash_to_sign(domain_separator: &B256, param_hash: &B256) -> B256 {
    let mut encoded = [0u8; 66];
    encoded[..2].copy_from_slice(&EIP712_PREFIX);
    encoded[2..34].copy_from_slice(domain_separator.as_slice());
    encoded[34..].copy_from_slice(param_hash.as_slice());
    keccak256(encoded)
}

/// Stake request parameters covered by the oracle signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeParams {
    /// Opaque tag attached to every validator of the batch.
    pub extra_data: U256,
    /// Address entitled to rewards and exits.
    #[serde(rename = "claimaddr")]
    pub claim_addr: Address,
    /// Execution-layer withdrawal address.
    #[serde(rename = "withdrawaddr")]
    pub withdraw_addr: Address,
    /// Validator public keys (48 bytes each).
    pub pubkeys: Vec<Bytes>,
    /// Deposit signatures (96 bytes each).
    pub signatures: Vec<Bytes>,
}

impl StakeParams {
    /// EIP-712 struct hash.
    pub fn struct_hash(&self) -> B256 {
        hash_stake_params(
            self.extra_data,
            self.claim_addr,
            self.withdraw_addr,
            self.pubkeys.as_slice(),
            self.signatures.as_slice(),
        )
    }

    /// EIP-712 signing digest under `domain_separator`.
    pub fn signing_hash(&self, domain_separator: &B256) -> B256 {
        hash_to_sign(domain_separator, &self.struct_hash())
    }
}

/// Check that `signature` over `params` was produced by `oracle`.
///
/// Any signature that is not exactly 65 bytes, or that fails recovery, is
/// rejected.
pub fn validate_authorization(
    domain_separator: &B256,
    oracle: Address,
    params: &StakeParams,
    signature: &[u8],
) -> bool {
    if oracle.is_zero() {
        return false;
    }
    let Ok(signature) = RecoverableSignature::from_slice(signature) else {
        return false;
    };

    let digest = params.signing_hash(domain_separator);
    match signature.recover(&digest) {
        Ok(signer) => signer == oracle,
        Err(e) => {
            tracing::debug!(error = %e, "Stake authorization recovery failed");
            false
        }
    }
}

/// Precomputed domain separator bound to an oracle address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAuthorizer {
    domain_separator: B256,
    oracle: Address,
}

impl StakeAuthorizer {
    /// Build an authorizer for the gateway at `verifying_contract`.
    pub fn new(chain_id: u64, verifying_contract: Address, oracle: Address) -> Self {
        Self::with_domain(
            hash_domain(DOMAIN_NAME, DOMAIN_VERSION, chain_id, verifying_contract),
            oracle,
        )
    }

    /// Build an authorizer from an explicit domain separator.
    pub fn with_domain(domain_separator: B256, oracle: Address) -> Self {
        Self {
            domain_separator,
            oracle,
        }
    }

    /// The domain separator.
    pub fn domain_separator(&self) -> B256 {
        self.domain_separator
    }

    /// The authorized oracle address.
    pub fn oracle(&self) -> Address {
        self.oracle
    }

    /// Replace the oracle address.
    pub fn set_oracle(&mut self, oracle: Address) {
        self.oracle = oracle;
    }

    /// Digest the oracle signs for `params`.
    pub fn digest(&self, params: &StakeParams) -> B256 {
        params.signing_hash(&self.domain_separator)
    }

    /// See [`validate_authorization`].
    pub fn validate(&self, params: &StakeParams, signature: &[u8]) -> bool {
        validate_authorization(&self.domain_separator, self.oracle, params, signature)
    }
}
