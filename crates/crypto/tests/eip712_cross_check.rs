//! Cross-checks the hand-rolled EIP-712 encoding against alloy's typed-data
//! implementation, and signature recovery against alloy's local signer.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct};
use lynx_crypto::{
    hash_domain, validate_authorization, OracleSigner, StakeAuthorizer, StakeParams, DOMAIN_NAME,
    DOMAIN_VERSION,
};
use proptest::prelude::*;
use std::borrow::Cow;

mod typed {
    alloy_sol_types::sol! {
        struct StakeParams {
            uint256 extraData;
            address claimaddr;
            address withdrawaddr;
            bytes[] pubkeys;
            bytes[] signatures;
        }
    }
}

fn alloy_domain(chain_id: u64, contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(DOMAIN_NAME)),
        Some(Cow::Borrowed(DOMAIN_VERSION)),
        Some(U256::from(chain_id)),
        Some(contract),
        None,
    )
}

fn to_typed(params: &StakeParams) -> typed::StakeParams {
    typed::StakeParams {
        extraData: params.extra_data,
        claimaddr: params.claim_addr,
        withdrawaddr: params.withdraw_addr,
        pubkeys: params.pubkeys.clone(),
        signatures: params.signatures.clone(),
    }
}

fn two_validator_params() -> StakeParams {
    StakeParams {
        extra_data: U256::from(0x1234),
        claim_addr: Address::with_last_byte(0xa1),
        withdraw_addr: Address::with_last_byte(0xb2),
        pubkeys: vec![Bytes::from(vec![0x11; 48]), Bytes::from(vec![0x22; 48])],
        signatures: vec![Bytes::from(vec![0x33; 96]), Bytes::from(vec![0x44; 96])],
    }
}

#[test]
fn test_type_string_matches_alloy() {
    assert_eq!(
        typed::StakeParams::eip712_encode_type(),
        lynx_crypto::eip712::STAKE_PARAMS_TYPE
    );
}

#[test]
fn test_domain_separator_matches_alloy() {
    let contract = Address::with_last_byte(0x42);
    assert_eq!(
        hash_domain(DOMAIN_NAME, DOMAIN_VERSION, 1, contract),
        alloy_domain(1, contract).separator()
    );
}

#[test]
fn test_struct_hash_matches_alloy() {
    let params = two_validator_params();
    assert_eq!(params.struct_hash(), to_typed(&params).eip712_hash_struct());
}

#[test]
fn test_signing_hash_matches_alloy() {
    let contract = Address::with_last_byte(0x42);
    let authorizer = StakeAuthorizer::new(17000, contract, Address::with_last_byte(1));
    let params = two_validator_params();

    assert_eq!(
        authorizer.digest(&params),
        to_typed(&params).eip712_signing_hash(&alloy_domain(17000, contract))
    );
}

#[test]
fn test_alloy_signature_validates() {
    let mut secret = [0u8; 32];
    secret[31] = 7;
    let alloy_signer = PrivateKeySigner::from_bytes(&B256::from(secret)).unwrap();
    let oracle = OracleSigner::from_bytes(&secret).unwrap();
    assert_eq!(alloy_signer.address(), oracle.address());

    let contract = Address::with_last_byte(0x42);
    let authorizer = StakeAuthorizer::new(1, contract, oracle.address());
    let params = two_validator_params();

    let digest = authorizer.digest(&params);
    let raw = alloy_signer.sign_hash_sync(&digest).unwrap().as_bytes();

    assert!(validate_authorization(
        &authorizer.domain_separator(),
        oracle.address(),
        &params,
        &raw
    ));

    // Our signer produces an equally valid signature for the same digest
    let ours = oracle.sign_digest(&digest).unwrap();
    assert!(authorizer.validate(&params, ours.as_bytes()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_domain_matches_alloy(chain_id in any::<u64>(), contract in any::<[u8; 20]>()) {
        let contract = Address::from(contract);
        prop_assert_eq!(
            hash_domain(DOMAIN_NAME, DOMAIN_VERSION, chain_id, contract),
            alloy_domain(chain_id, contract).separator()
        );
    }

    #[test]
    fn prop_struct_hash_matches_alloy(
        extra in any::<u64>(),
        pubkeys in prop::collection::vec(prop::collection::vec(any::<u8>(), 48), 0..4),
        signatures in prop::collection::vec(prop::collection::vec(any::<u8>(), 96), 0..4),
    ) {
        let params = StakeParams {
            extra_data: U256::from(extra),
            claim_addr: Address::with_last_byte(1),
            withdraw_addr: Address::with_last_byte(2),
            pubkeys: pubkeys.into_iter().map(Bytes::from).collect(),
            signatures: signatures.into_iter().map(Bytes::from).collect(),
        };
        prop_assert_eq!(params.struct_hash(), to_typed(&params).eip712_hash_struct());
    }
}
