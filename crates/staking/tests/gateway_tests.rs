//! Integration tests for the direct staking gateway.
//!
//! These tests wire a gateway to an in-memory deposit contract and a rewards
//! vault, and verify:
//! - the end-to-end stake flow and the forwarded deposit root
//! - every stake precondition and its abort reason
//! - replay protection
//! - exit, batch exit and emergency exit
//! - the ABI entry point

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use lynx_crypto::{DepositData, OracleSigner};
use lynx_staking::{
    deposit_value, DepositContract, DirectStaking, IDirectStaking, InMemoryDepositContract,
    InMemoryLedger, RewardsVault, Role, StakeParams, StakeRequest, StakingConfig, StakingError,
    StakingEvent, MAX_BATCH_SIZE,
};
use revm::precompile::PrecompileError;
use std::sync::Arc;

const GATEWAY: Address = Address::new([0x10; 20]);
const VAULT: Address = Address::new([0x20; 20]);
const DEPOSIT_CONTRACT: Address = Address::new([0x30; 20]);
const ADMIN: Address = Address::new([0xad; 20]);
const MANAGER: Address = Address::new([0x3a; 20]);
const PAUSER: Address = Address::new([0x9a; 20]);
const STAKER: Address = Address::new([0x5e; 20]);

struct Harness {
    gateway: DirectStaking,
    vault: Arc<RewardsVault>,
    deposits: Arc<InMemoryDepositContract>,
    ledger: Arc<InMemoryLedger>,
    oracle: OracleSigner,
}

fn oracle_key() -> [u8; 32] {
    let mut secret = [0u8; 32];
    secret[31] = 7;
    secret
}

fn test_config(oracle: Address) -> StakingConfig {
    let mut config = StakingConfig::new(17000, GATEWAY, VAULT, oracle, ADMIN);
    config.manager = MANAGER;
    config.pauser = PAUSER;
    config
}

fn harness() -> Harness {
    let oracle = OracleSigner::from_bytes(&oracle_key()).unwrap();
    let config = test_config(oracle.address());

    let ledger = Arc::new(InMemoryLedger::new());
    let vault = Arc::new(RewardsVault::from_config(&config, ledger.clone()).unwrap());
    let deposits = Arc::new(InMemoryDepositContract::new(DEPOSIT_CONTRACT));
    let gateway = DirectStaking::from_config(&config, deposits.clone(), vault.clone()).unwrap();

    Harness {
        gateway,
        vault,
        deposits,
        ledger,
        oracle,
    }
}

fn withdraw_address() -> Address {
    "0x742d35Cc6634C0532925a3b844Bc9e7595f0bC01"
        .parse()
        .unwrap()
}

fn patterned_pubkey() -> Bytes {
    Bytes::from((0..48u8).map(|i| i + 1).collect::<Vec<_>>())
}

fn patterned_signature() -> Bytes {
    Bytes::from(
        (0..96u32)
            .map(|i| ((i * 7 + 3) % 256) as u8)
            .collect::<Vec<_>>(),
    )
}

/// Parameters for `count` validators owned by `owner`.
fn params_for(owner: Address, count: usize) -> StakeParams {
    StakeParams {
        extra_data: U256::ZERO,
        claim_addr: owner,
        withdraw_addr: owner,
        pubkeys: (0..count)
            .map(|i| Bytes::from(vec![i as u8 + 1; 48]))
            .collect(),
        signatures: (0..count)
            .map(|i| Bytes::from(vec![i as u8 + 0x80; 96]))
            .collect(),
    }
}

fn sign(h: &Harness, params: StakeParams) -> StakeRequest {
    let digest = h.gateway.stake_digest(&params);
    let sig = h.oracle.sign_digest(&digest).unwrap();
    StakeRequest::new(params, sig.as_bytes().to_vec())
}

fn eth32(n: u64) -> U256 {
    deposit_value() * U256::from(n)
}

/// Assert nothing of a rejected request stuck to gateway, vault or deposit contract.
fn assert_untouched(h: &Harness, request: &StakeRequest) {
    assert_eq!(h.gateway.validator_count(), 0);
    assert!(!h.gateway.is_replayed(&request.params_sig));
    assert_eq!(h.gateway.total_tips(), U256::ZERO);
    assert_eq!(h.vault.total_shares(), U256::ZERO);
    assert_eq!(h.deposits.deposit_count(), 0);
    assert!(h
        .gateway
        .events()
        .snapshot()
        .iter()
        .all(|e| !matches!(e, StakingEvent::Staked { .. })));
}

#[test]
fn test_end_to_end_single_validator() {
    let h = harness();
    let owner = withdraw_address();
    let params = StakeParams {
        extra_data: U256::ZERO,
        claim_addr: owner,
        withdraw_addr: owner,
        pubkeys: vec![patterned_pubkey()],
        signatures: vec![patterned_signature()],
    };
    let request = sign(&h, params);

    let registered = h.gateway.stake(STAKER, eth32(1), &request).unwrap();
    assert_eq!(registered, 1);

    // One record appended
    let record = h.gateway.validator(0).unwrap();
    assert_eq!(record.pubkey.as_slice(), &patterned_pubkey()[..]);
    assert_eq!(record.claim_address, owner);
    assert!(!record.exiting);
    assert_eq!(h.gateway.validators_of(&owner), vec![0]);

    // One deposit forwarded with the reference root
    let forwarded = h.deposits.deposits();
    assert_eq!(forwarded.len(), 1);
    let expected_root: B256 = "0xfab8048479a10978290739d77ea4c62fe3a3b1db1fa096ac84832c7412ac63d2"
        .parse()
        .unwrap();
    assert_eq!(forwarded[0].deposit_data_root, expected_root);
    assert_eq!(forwarded[0].value, deposit_value());

    // Pool joined for the owner with the full staked amount
    assert_eq!(h.vault.member(&owner).unwrap().amount, eth32(1));
    assert_eq!(
        h.vault.events().drain(),
        vec![StakingEvent::PoolJoined {
            member: owner,
            amount: eth32(1),
        }]
    );

    // Stake-completed event carries caller and value
    assert_eq!(
        h.gateway.events().drain(),
        vec![StakingEvent::Staked {
            caller: STAKER,
            value: eth32(1),
        }]
    );
    assert!(h.gateway.is_replayed(&request.params_sig));
}

#[test]
fn test_batch_stake_with_tips() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    let request = sign(&h, params_for(owner, 3)).with_tips(U256::from(12345));

    let value = eth32(3) + U256::from(12345);
    assert_eq!(h.gateway.stake(STAKER, value, &request).unwrap(), 3);

    assert_eq!(h.gateway.validator_count(), 3);
    assert_eq!(h.gateway.validators_of(&owner), vec![0, 1, 2]);
    assert_eq!(h.gateway.total_tips(), U256::from(12345));
    assert_eq!(h.deposits.deposit_count(), 3);
    assert_eq!(h.deposits.total_value(), eth32(3));
    assert_eq!(h.vault.total_shares(), eth32(3));
}

#[test]
fn test_replayed_signature_rejected() {
    let h = harness();
    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 1));

    h.gateway.stake(STAKER, eth32(1), &request).unwrap();
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::ReplayedParams)
    );
    // Replay is checked before anything else, whatever the value
    assert_eq!(
        h.gateway.stake(STAKER, U256::ZERO, &request),
        Err(StakingError::ReplayedParams)
    );
    assert_eq!(h.gateway.validator_count(), 1);
}

#[test]
fn test_tampered_params_rejected() {
    let h = harness();
    let mut request = sign(&h, params_for(Address::with_last_byte(0xaa), 1));
    request.params.extra_data = U256::from(1);

    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::SignatureMismatch)
    );
    assert_untouched(&h, &request);
}

#[test]
fn test_signature_from_other_key_rejected() {
    let h = harness();
    let params = params_for(Address::with_last_byte(0xaa), 1);
    let mut other = [0u8; 32];
    other[31] = 8;
    let impostor = OracleSigner::from_bytes(&other).unwrap();
    let sig = impostor
        .sign_digest(&h.gateway.stake_digest(&params))
        .unwrap();
    let request = StakeRequest::new(params, sig.as_bytes().to_vec());

    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::SignatureMismatch)
    );
}

#[test]
fn test_compact_signature_rejected() {
    let h = harness();
    let mut request = sign(&h, params_for(Address::with_last_byte(0xaa), 1));
    request.params_sig = Bytes::copy_from_slice(&request.params_sig[..64]);

    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::SignatureMismatch)
    );
}

#[test]
fn test_length_mismatch_and_batch_cap() {
    let h = harness();
    let mut params = params_for(Address::with_last_byte(0xaa), 2);
    params.signatures.pop();
    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(2), &request),
        Err(StakingError::LengthMismatch {
            pubkeys: 2,
            signatures: 1,
        })
    );

    let params = StakeParams {
        pubkeys: vec![Bytes::from(vec![1u8; 48]); MAX_BATCH_SIZE + 1],
        signatures: vec![Bytes::from(vec![2u8; 96]); MAX_BATCH_SIZE + 1],
        ..params_for(Address::with_last_byte(0xaa), 0)
    };
    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(MAX_BATCH_SIZE as u64 + 1), &request),
        Err(StakingError::BatchTooLarge {
            count: MAX_BATCH_SIZE + 1,
            max: MAX_BATCH_SIZE,
        })
    );
    assert_untouched(&h, &request);
}

#[test]
fn test_zero_addresses_rejected() {
    let h = harness();
    let mut params = params_for(Address::with_last_byte(0xaa), 1);
    params.claim_addr = Address::ZERO;
    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::ZeroAddress("claim address"))
    );

    let mut params = params_for(Address::with_last_byte(0xaa), 1);
    params.withdraw_addr = Address::ZERO;
    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::ZeroAddress("withdraw address"))
    );
}

#[test]
fn test_value_checks() {
    let h = harness();

    // Tips larger than value abort rather than clamp
    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 1)).with_tips(eth32(2));
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::TipsExceedValue {
            value: eth32(1),
            tips: eth32(2),
        })
    );

    let request = sign(&h, params_for(Address::with_last_byte(0xab), 1));
    assert_eq!(
        h.gateway
            .stake(STAKER, eth32(1) + U256::from(1), &request),
        Err(StakingError::MisalignedValue(eth32(1) + U256::from(1)))
    );
    assert!(matches!(
        h.gateway.stake(STAKER, eth32(2), &request),
        Err(StakingError::ValidatorCountMismatch { requested: 1, .. })
    ));
    assert_untouched(&h, &request);
}

#[test]
fn test_field_lengths_checked() {
    let h = harness();
    let mut params = params_for(Address::with_last_byte(0xaa), 2);
    params.pubkeys[1] = Bytes::from(vec![1u8; 47]);
    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(2), &request),
        Err(StakingError::InvalidPubkeyLength {
            index: 1,
            length: 47,
        })
    );

    let mut params = params_for(Address::with_last_byte(0xaa), 1);
    params.signatures[0] = Bytes::from(vec![1u8; 95]);
    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::InvalidSignatureLength {
            index: 0,
            length: 95,
        })
    );
    assert_untouched(&h, &request);
}

struct RejectingDepositContract;

impl DepositContract for RejectingDepositContract {
    fn address(&self) -> Address {
        DEPOSIT_CONTRACT
    }

    fn check(
        &self,
        _data: &DepositData,
        _deposit_data_root: B256,
        _value: U256,
    ) -> lynx_staking::Result<()> {
        Err(StakingError::deposit("deposit contract paused"))
    }

    fn record(&self, _data: &DepositData, _deposit_data_root: B256, _value: U256) {}
}

/// Accepts everything except deposits for one pubkey.
struct SelectiveDepositContract {
    inner: InMemoryDepositContract,
    rejected: Bytes,
}

impl DepositContract for SelectiveDepositContract {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn check(
        &self,
        data: &DepositData,
        deposit_data_root: B256,
        value: U256,
    ) -> lynx_staking::Result<()> {
        if data.pubkey.as_slice() == &self.rejected[..] {
            return Err(StakingError::deposit("pubkey already deposited"));
        }
        self.inner.check(data, deposit_data_root, value)
    }

    fn record(&self, data: &DepositData, deposit_data_root: B256, value: U256) {
        self.inner.record(data, deposit_data_root, value);
    }
}

#[test]
fn test_failed_deposit_aborts_batch() {
    let h = harness();
    h.gateway
        .set_deposit_contract(ADMIN, Arc::new(RejectingDepositContract))
        .unwrap();

    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 2));
    assert!(matches!(
        h.gateway.stake(STAKER, eth32(2), &request),
        Err(StakingError::DepositFailed(_))
    ));
    assert_untouched(&h, &request);
}

#[test]
fn test_deposit_rejected_midway_forwards_nothing() {
    let h = harness();
    let params = params_for(Address::with_last_byte(0xaa), 3);
    let contract = Arc::new(SelectiveDepositContract {
        inner: InMemoryDepositContract::new(DEPOSIT_CONTRACT),
        rejected: params.pubkeys[1].clone(),
    });
    h.gateway
        .set_deposit_contract(ADMIN, contract.clone())
        .unwrap();

    let request = sign(&h, params);
    assert_eq!(
        h.gateway.stake(STAKER, eth32(3), &request),
        Err(StakingError::deposit("pubkey already deposited"))
    );
    assert_eq!(contract.inner.deposit_count(), 0);
    assert_eq!(contract.inner.total_value(), U256::ZERO);
    assert_untouched(&h, &request);
}

#[test]
fn test_unconfigured_dependencies() {
    let oracle = OracleSigner::from_bytes(&oracle_key()).unwrap();
    let gateway = DirectStaking::new(17000, GATEWAY, ADMIN);
    gateway.set_oracle(ADMIN, oracle.address()).unwrap();

    let params = params_for(Address::with_last_byte(0xaa), 1);
    let sig = oracle.sign_digest(&gateway.stake_digest(&params)).unwrap();
    let request = StakeRequest::new(params, sig.as_bytes().to_vec());

    assert_eq!(
        gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::NotConfigured("deposit contract"))
    );

    gateway
        .set_deposit_contract(
            ADMIN,
            Arc::new(InMemoryDepositContract::new(DEPOSIT_CONTRACT)),
        )
        .unwrap();
    assert_eq!(
        gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::NotConfigured("vault"))
    );
}

#[test]
fn test_vault_without_controller_role_aborts() {
    let h = harness();
    h.vault
        .revoke_role(ADMIN, Role::Controller, GATEWAY)
        .unwrap();

    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 1));
    assert!(matches!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::Unauthorized {
            role: "CONTROLLER",
            ..
        })
    ));
    assert_untouched(&h, &request);
}

#[test]
fn test_paused_vault_forwards_no_deposit() {
    let h = harness();
    h.vault.pause(PAUSER).unwrap();

    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 2));
    assert_eq!(
        h.gateway.stake(STAKER, eth32(2), &request),
        Err(StakingError::Paused)
    );
    assert_untouched(&h, &request);
    assert_eq!(h.deposits.total_value(), U256::ZERO);

    h.vault.unpause(PAUSER).unwrap();
    assert_eq!(h.gateway.stake(STAKER, eth32(2), &request), Ok(2));
    assert_eq!(h.deposits.deposit_count(), 2);
    assert_eq!(h.vault.total_shares(), eth32(2));
}

#[test]
fn test_paused_gateway() {
    let h = harness();
    assert!(h.gateway.pause(STAKER).is_err());
    h.gateway.pause(PAUSER).unwrap();
    assert!(h.gateway.is_paused());

    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 1));
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::Paused)
    );

    h.gateway.unpause(PAUSER).unwrap();
    assert!(h.gateway.stake(STAKER, eth32(1), &request).is_ok());

    let events = h.gateway.events().drain();
    assert_eq!(events[0], StakingEvent::Paused { account: PAUSER });
    assert_eq!(events[1], StakingEvent::Unpaused { account: PAUSER });
}

#[test]
fn test_exit_flow() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    h.gateway
        .stake(STAKER, eth32(2), &sign(&h, params_for(owner, 2)))
        .unwrap();

    assert_eq!(
        h.gateway.exit(STAKER, 0),
        Err(StakingError::NotClaimAddress {
            id: 0,
            caller: STAKER,
        })
    );
    assert_eq!(
        h.gateway.exit(owner, 7),
        Err(StakingError::ValidatorNotFound(7))
    );

    h.gateway.exit(owner, 1).unwrap();
    assert!(h.gateway.validator(1).unwrap().exiting);
    assert_eq!(h.gateway.exit_queue(0, 10), vec![1]);
    assert_eq!(h.vault.total_shares(), eth32(1));

    assert_eq!(
        h.gateway.exit(owner, 1),
        Err(StakingError::AlreadyExiting(1))
    );
    assert_eq!(h.gateway.exit_queue_len(), 1);
    assert_eq!(h.vault.total_shares(), eth32(1));

    assert!(h.gateway.events().drain().contains(&StakingEvent::ValidatorExited {
        id: 1,
        claim_address: owner,
    }));
}

#[test]
fn test_batch_exit_is_per_element() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    h.gateway
        .stake(STAKER, eth32(2), &sign(&h, params_for(owner, 2)))
        .unwrap();

    let outcomes = h.gateway.batch_exit(owner, &[0, 0, 9, 1]).unwrap();
    assert_eq!(
        outcomes,
        vec![
            Ok(()),
            Err(StakingError::AlreadyExiting(0)),
            Err(StakingError::ValidatorNotFound(9)),
            Ok(()),
        ]
    );
    assert_eq!(h.gateway.exit_queue(0, u64::MAX), vec![0, 1]);
    assert_eq!(h.vault.total_shares(), U256::ZERO);
}

#[test]
fn test_emergency_exit_with_claim() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    h.gateway
        .stake(STAKER, eth32(1), &sign(&h, params_for(owner, 1)))
        .unwrap();

    let reward = U256::from(5_000_000_000_000_000u64);
    h.vault.receive(reward).unwrap();

    assert!(matches!(
        h.gateway.emergency_exit(owner, 0, true),
        Err(StakingError::Unauthorized { role: "MANAGER", .. })
    ));

    let claimed = h.gateway.emergency_exit(MANAGER, 0, true).unwrap();
    assert_eq!(claimed, reward);
    assert_eq!(h.ledger.balance_of(&owner), reward);
    assert_eq!(h.vault.pending_reward(&owner), U256::ZERO);
    assert_eq!(h.vault.total_shares(), U256::ZERO);
    assert_eq!(h.gateway.exit_queue(0, 10), vec![0]);
}

#[test]
fn test_emergency_exit_payout_failure_keeps_validator() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    h.gateway
        .stake(STAKER, eth32(1), &sign(&h, params_for(owner, 1)))
        .unwrap();
    h.vault.receive(U256::from(1_000_000u64)).unwrap();
    h.ledger.reject(owner);

    assert!(matches!(
        h.gateway.emergency_exit(MANAGER, 0, true),
        Err(StakingError::TransferFailed(_))
    ));
    assert!(!h.gateway.validator(0).unwrap().exiting);
    assert_eq!(h.vault.total_shares(), eth32(1));
    assert_eq!(h.vault.pending_reward(&owner), U256::from(1_000_000u64));

    // Without the payout the exit goes through
    assert_eq!(
        h.gateway.emergency_exit(MANAGER, 0, false).unwrap(),
        U256::ZERO
    );
    assert_eq!(h.vault.pending_reward(&owner), U256::from(1_000_000u64));
}

#[test]
fn test_admin_setters_emit_events() {
    let h = harness();
    let new_oracle = Address::with_last_byte(0x0e);

    assert!(h.gateway.set_oracle(STAKER, new_oracle).is_err());
    assert_eq!(
        h.gateway.set_oracle(ADMIN, Address::ZERO),
        Err(StakingError::ZeroAddress("oracle"))
    );
    h.gateway.set_oracle(ADMIN, new_oracle).unwrap();
    assert_eq!(h.gateway.oracle(), new_oracle);

    h.gateway.set_vault(ADMIN, h.vault.clone()).unwrap();
    h.gateway
        .set_deposit_contract(ADMIN, h.deposits.clone())
        .unwrap();

    assert_eq!(
        h.gateway.events().drain(),
        vec![
            StakingEvent::OracleChanged { oracle: new_oracle },
            StakingEvent::VaultChanged { vault: VAULT },
            StakingEvent::DepositContractChanged {
                deposit_contract: DEPOSIT_CONTRACT,
            },
        ]
    );

    // Requests signed by the previous oracle no longer validate
    let request = sign(&h, params_for(Address::with_last_byte(0xaa), 1));
    assert_eq!(
        h.gateway.stake(STAKER, eth32(1), &request),
        Err(StakingError::SignatureMismatch)
    );
}

#[test]
fn test_run_stake_and_views() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    let request = sign(&h, params_for(owner, 2));

    let call = IDirectStaking::stakeCall {
        extraData: request.params.extra_data,
        claimaddr: request.params.claim_addr,
        withdrawaddr: request.params.withdraw_addr,
        pubkeys: request.params.pubkeys.clone(),
        signatures: request.params.signatures.clone(),
        paramsSig: request.params_sig.clone(),
        tips: U256::ZERO,
    };
    let input = Bytes::from(call.abi_encode());

    // Not enough gas for two validators
    assert!(h.gateway.run(&input, 60_000, STAKER, eth32(2)).is_err());
    assert_eq!(h.gateway.validator_count(), 0);

    let output = h.gateway.run(&input, 1_000_000, STAKER, eth32(2)).unwrap();
    assert_eq!(output.gas_used, 50_000 + 2 * 40_000);
    assert!(!output.reverted);

    let count = h
        .gateway
        .run(
            &Bytes::from(IDirectStaking::getValidatorCountCall {}.abi_encode()),
            100_000,
            STAKER,
            U256::ZERO,
        )
        .unwrap();
    assert_eq!(U256::from_be_slice(&count.bytes), U256::from(2));

    let replayed = h
        .gateway
        .run(
            &Bytes::from(
                IDirectStaking::isReplayedCall {
                    paramsSig: request.params_sig.clone(),
                }
                .abi_encode(),
            ),
            100_000,
            STAKER,
            U256::ZERO,
        )
        .unwrap();
    assert_eq!(U256::from_be_slice(&replayed.bytes), U256::from(1));

    let separator = h
        .gateway
        .run(
            &Bytes::from(IDirectStaking::domainSeparatorCall {}.abi_encode()),
            100_000,
            STAKER,
            U256::ZERO,
        )
        .unwrap();
    assert_eq!(&separator.bytes[..], h.gateway.domain_separator().as_slice());

    // Second submission of the same call is a replay
    let err = h.gateway.run(&input, 1_000_000, STAKER, eth32(2)).unwrap_err();
    assert!(matches!(err, PrecompileError::Fatal(msg) if msg == "REPLAYED_PARAMS"));
}

#[test]
fn test_run_exit_and_get_validator() {
    let h = harness();
    let owner = Address::with_last_byte(0xaa);
    h.gateway
        .stake(STAKER, eth32(1), &sign(&h, params_for(owner, 1)))
        .unwrap();

    let exit = Bytes::from(IDirectStaking::exitCall { id: U256::ZERO }.abi_encode());
    assert!(h.gateway.run(&exit, 100_000, STAKER, U256::ZERO).is_err());
    h.gateway.run(&exit, 100_000, owner, U256::ZERO).unwrap();

    let input = Bytes::from(IDirectStaking::getValidatorCall { id: U256::ZERO }.abi_encode());
    let output = h.gateway.run(&input, 100_000, owner, U256::ZERO).unwrap();
    let decoded = IDirectStaking::getValidatorCall::abi_decode_returns(&output.bytes).unwrap();
    assert_eq!(decoded.pubkey, Bytes::from(vec![1u8; 48]));
    assert_eq!(decoded.claimAddress, owner);
    assert!(decoded.exiting);

    let missing = Bytes::from(IDirectStaking::getValidatorCall { id: U256::from(5) }.abi_encode());
    assert!(h.gateway.run(&missing, 100_000, owner, U256::ZERO).is_err());
}
