//! Direct staking gateway precompile.
//!
//! Provides oracle-authorized validator staking:
//! - stake(...) forwards one 32 ETH deposit per validator and joins the
//!   claim address to the rewards vault
//! - exit(uint256) / batchExit(uint256[]) queue validators for exit
//! - emergencyExit(uint256, bool) manager-only exit with optional payout
//!
//! Every stake request carries an EIP-712 signature of the oracle over
//! `StakeParams`; a raw signature can be consumed only once.

use crate::access::{AccessControl, EntryToken, ReentrancyGuard, Role};
use crate::config::StakingConfig;
use crate::deposit_contract::{deposit_value, DepositContract};
use crate::error::{Result, StakingError};
use crate::events::{EventLog, StakingEvent};
use crate::precompiles::vault::RewardsVault;
use crate::precompiles::{charge, decode_calls, success, to_f64};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolValue};
use lynx_crypto::{
    withdrawal_credentials, BlsPubkey, BlsSignature, DepositData, StakeAuthorizer, StakeParams,
    DEPOSIT_AMOUNT_GWEI, DEPOSIT_SIGNATURE_LENGTH, PUBKEY_LENGTH,
};
use lynx_metrics::staking::{
    STAKING_DEPOSITS_FORWARDED, STAKING_EXIT_QUEUE_LENGTH, STAKING_REQUESTS_REJECTED,
    STAKING_TIPS_COLLECTED, STAKING_VALIDATORS_EXITED, STAKING_VALIDATORS_STAKED,
};
use parking_lot::RwLock;
use revm::precompile::{PrecompileError, PrecompileResult};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

/// Maximum validators per stake request.
pub const MAX_BATCH_SIZE: usize = 500;

/// Gas costs for gateway operations.
pub mod gas {
    /// Base gas cost for stake.
    pub const STAKE_BASE: u64 = 50_000;

    /// Per-validator gas cost for stake (deposit forwarding dominates).
    pub const STAKE_PER_VALIDATOR: u64 = 40_000;

    /// Gas cost for exit.
    pub const EXIT: u64 = 30_000;

    /// Per-validator gas cost for batchExit.
    pub const BATCH_EXIT_PER_VALIDATOR: u64 = 30_000;

    /// Gas cost for emergencyExit.
    pub const EMERGENCY_EXIT: u64 = 50_000;

    /// Gas cost for setOracle.
    pub const SET_ORACLE: u64 = 20_000;

    /// Gas cost for pause / unpause.
    pub const PAUSE: u64 = 10_000;

    /// Base gas cost for read-only queries.
    pub const VIEW: u64 = 2_100;

    /// Per-item gas cost for range queries.
    pub const VIEW_PER_ITEM: u64 = 100;
}

sol! {
    /// Direct staking gateway interface.
    interface IDirectStaking {
        /// Stake one validator per pubkey.
        ///
        /// Requires: msg.value == 32 ETH * pubkeys.length + tips
        /// Gas: 50,000 + 40,000 per validator
        function stake(
            uint256 extraData,
            address claimaddr,
            address withdrawaddr,
            bytes[] pubkeys,
            bytes[] signatures,
            bytes paramsSig,
            uint256 tips
        ) external payable;

        /// Queue a validator for exit (claim address only).
        /// Gas: 30,000
        function exit(uint256 id) external;

        /// Queue several validators for exit; returns per-element success.
        /// Gas: 30,000 per validator
        function batchExit(uint256[] ids) external returns (bool[]);

        /// Queue a validator for exit (manager-only).
        /// Gas: 50,000
        function emergencyExit(uint256 id, bool toClaimAddress) external;

        /// Replace the oracle (admin-only).
        /// Gas: 20,000
        function setOracle(address oracle) external;

        /// Pause state-mutating entry points (pauser-only).
        function pause() external;

        /// Unpause state-mutating entry points (pauser-only).
        function unpause() external;

        function getValidatorCount() external view returns (uint256);
        function getValidator(uint256 id) external view returns (bytes pubkey, address claimAddress, uint256 extraData, bool exiting);
        function getExitQueueLength() external view returns (uint256);
        function getExitQueue(uint256 start, uint256 end) external view returns (uint256[]);
        function isReplayed(bytes paramsSig) external view returns (bool);
        function getTotalTips() external view returns (uint256);
        function getOracle() external view returns (address);
        function domainSeparator() external view returns (bytes32);
    }
}

use IDirectStaking::IDirectStakingCalls;

/// Registered validator. The index in the registry is its permanent id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRecord {
    /// BLS public key.
    pub pubkey: BlsPubkey,
    /// Owner entitled to rewards and exit.
    pub claim_address: Address,
    /// Opaque tag from the stake request.
    pub extra_data: U256,
    /// Queued for exit. Never flips back.
    pub exiting: bool,
}

/// Stake request as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeRequest {
    /// Parameters covered by the oracle signature.
    pub params: StakeParams,
    /// Oracle signature over `params` (65 bytes).
    pub params_sig: Bytes,
    /// Part of the attached value kept by the gateway.
    pub tips: U256,
}

impl StakeRequest {
    /// Request without tips.
    pub fn new(params: StakeParams, params_sig: impl Into<Bytes>) -> Self {
        Self {
            params,
            params_sig: params_sig.into(),
            tips: U256::ZERO,
        }
    }

    /// Attach tips.
    pub fn with_tips(mut self, tips: U256) -> Self {
        self.tips = tips;
        self
    }
}

/// Gateway state.
#[derive(Debug, Clone, Default)]
pub struct GatewayState {
    /// Append-only validator registry.
    pub validators: Vec<ValidatorRecord>,
    /// Validator ids awaiting exit processing.
    pub exit_queue: Vec<u64>,
    /// keccak256 of every consumed authorization signature.
    pub signed_params: HashSet<B256>,
    /// Tips accumulated across stake requests.
    pub total_tips: U256,
    /// Validator ids by claim address.
    pub by_claim_address: HashMap<Address, Vec<u64>>,
}

impl GatewayState {
    /// Look up a validator by id.
    pub fn validator(&self, id: u64) -> Option<&ValidatorRecord> {
        usize::try_from(id).ok().and_then(|i| self.validators.get(i))
    }

    /// Whether the signature hash was already consumed.
    pub fn is_replayed(&self, params_hash: &B256) -> bool {
        self.signed_params.contains(params_hash)
    }

    /// Append a validator and return its id.
    pub fn push_validator(&mut self, record: ValidatorRecord) -> u64 {
        let id = self.validators.len() as u64;
        self.by_claim_address
            .entry(record.claim_address)
            .or_default()
            .push(id);
        self.validators.push(record);
        id
    }

    /// Flip `exiting` and enqueue the validator.
    fn mark_exiting(&mut self, id: u64) -> Result<()> {
        let record = usize::try_from(id)
            .ok()
            .and_then(|i| self.validators.get_mut(i))
            .ok_or(StakingError::ValidatorNotFound(id))?;
        if record.exiting {
            return Err(StakingError::AlreadyExiting(id));
        }
        record.exiting = true;
        self.exit_queue.push(id);
        Ok(())
    }
}

/// Direct staking gateway implementation.
///
/// Thread-safe using Arc<RwLock<GatewayState>>. The deposit contract and the
/// vault are held as capabilities; the gateway never touches vault state
/// except through the vault's controller entry points.
pub struct DirectStaking {
    address: Address,
    state: Arc<RwLock<GatewayState>>,
    access: RwLock<AccessControl>,
    guard: ReentrancyGuard,
    authorizer: RwLock<StakeAuthorizer>,
    deposit_contract: RwLock<Option<Arc<dyn DepositContract>>>,
    vault: RwLock<Option<Arc<RewardsVault>>>,
    events: EventLog,
}

impl fmt::Debug for DirectStaking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectStaking")
            .field("address", &self.address)
            .field("state", &self.state)
            .field("authorizer", &self.authorizer)
            .field("deposit_contract", &self.deposit_contract_address())
            .field("vault", &self.vault.read().as_ref().map(|v| v.address()))
            .finish_non_exhaustive()
    }
}

impl DirectStaking {
    /// Create an unconfigured gateway at `address` with `admin` holding the
    /// admin role. Oracle, deposit contract and vault must be set before
    /// the first stake.
    pub fn new(chain_id: u64, address: Address, admin: Address) -> Self {
        Self::with_authorizer(
            address,
            admin,
            StakeAuthorizer::new(chain_id, address, Address::ZERO),
        )
    }

    fn with_authorizer(address: Address, admin: Address, authorizer: StakeAuthorizer) -> Self {
        Self {
            address,
            state: Arc::new(RwLock::new(GatewayState::default())),
            access: RwLock::new(AccessControl::new(admin)),
            guard: ReentrancyGuard::new(),
            authorizer: RwLock::new(authorizer),
            deposit_contract: RwLock::new(None),
            vault: RwLock::new(None),
            events: EventLog::new(),
        }
    }

    /// Create a fully wired gateway from deployment config.
    ///
    /// The vault must grant the controller role to `config.gateway_address`
    /// (see [`RewardsVault::from_config`]).
    pub fn from_config(
        config: &StakingConfig,
        deposit_contract: Arc<dyn DepositContract>,
        vault: Arc<RewardsVault>,
    ) -> Result<Self> {
        config.validate()?;
        if vault.address() != config.vault_address {
            return Err(StakingError::config(format!(
                "vault at {} does not match configured vault_address {}",
                vault.address(),
                config.vault_address
            )));
        }

        let gateway = Self::with_authorizer(
            config.gateway_address,
            config.admin,
            StakeAuthorizer::with_domain(config.domain_separator(), config.oracle),
        );
        {
            let mut access = gateway.access.write();
            access.grant_role(&config.admin, Role::Manager, config.manager)?;
            access.grant_role(&config.admin, Role::Pauser, config.pauser)?;
        }
        *gateway.deposit_contract.write() = Some(deposit_contract);
        *gateway.vault.write() = Some(vault);

        tracing::info!(
            gateway = %config.gateway_address,
            chain_id = config.chain_id,
            oracle = %config.oracle,
            domain_separator = %config.domain_separator(),
            "Initialized staking gateway from config"
        );
        Ok(gateway)
    }

    /// Address of the gateway.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get a reference to the current state (for testing/queries).
    pub fn state(&self) -> Arc<RwLock<GatewayState>> {
        Arc::clone(&self.state)
    }

    /// Events recorded by the gateway.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn enter(&self) -> Result<EntryToken<'_>> {
        let token = self.guard.enter()?;
        self.access.read().require_not_paused()?;
        Ok(token)
    }

    fn configured_vault(&self) -> Result<Arc<RewardsVault>> {
        self.vault
            .read()
            .clone()
            .ok_or(StakingError::NotConfigured("vault"))
    }

    // ========================================================================
    // Staking
    // ========================================================================

    /// Stake one validator per pubkey of `request`, with `value` wei attached.
    ///
    /// Returns the number of validators registered. Any failure aborts the
    /// whole request: gateway and vault state stay untouched and no deposit
    /// reaches the deposit contract.
    pub fn stake(&self, caller: Address, value: U256, request: &StakeRequest) -> Result<usize> {
        let result = self.try_stake(caller, value, request);
        if let Err(e) = &result {
            STAKING_REQUESTS_REJECTED
                .with_label_values(&[e.reason()])
                .inc();
            tracing::warn!(caller = %caller, value = %value, error = %e, "Stake request rejected");
        }
        result
    }

    fn try_stake(&self, caller: Address, value: U256, request: &StakeRequest) -> Result<usize> {
        let _entry = self.enter()?;
        let params = &request.params;

        let params_hash = keccak256(&request.params_sig);
        if self.state.read().is_replayed(&params_hash) {
            return Err(StakingError::ReplayedParams);
        }

        let count = params.pubkeys.len();
        if params.signatures.len() != count {
            return Err(StakingError::LengthMismatch {
                pubkeys: count,
                signatures: params.signatures.len(),
            });
        }
        if count > MAX_BATCH_SIZE {
            return Err(StakingError::BatchTooLarge {
                count,
                max: MAX_BATCH_SIZE,
            });
        }

        let authorizer = *self.authorizer.read();
        if authorizer.oracle().is_zero() {
            return Err(StakingError::NotConfigured("oracle"));
        }
        let deposit_contract = self
            .deposit_contract
            .read()
            .clone()
            .ok_or(StakingError::NotConfigured("deposit contract"))?;
        let vault = self.configured_vault()?;

        if !authorizer.validate(params, &request.params_sig) {
            return Err(StakingError::SignatureMismatch);
        }

        if params.claim_addr.is_zero() {
            return Err(StakingError::ZeroAddress("claim address"));
        }
        if params.withdraw_addr.is_zero() {
            return Err(StakingError::ZeroAddress("withdraw address"));
        }

        let staked = value
            .checked_sub(request.tips)
            .ok_or(StakingError::TipsExceedValue {
                value,
                tips: request.tips,
            })?;
        let unit = deposit_value();
        if !(staked % unit).is_zero() {
            return Err(StakingError::MisalignedValue(staked));
        }
        let covered = staked / unit;
        if covered != U256::from(count) {
            return Err(StakingError::ValidatorCountMismatch {
                covered,
                requested: count,
            });
        }

        let credentials = withdrawal_credentials(&params.withdraw_addr);
        let mut deposits = Vec::with_capacity(count);
        let mut records = Vec::with_capacity(count);
        for (index, (pubkey, signature)) in params
            .pubkeys
            .iter()
            .zip(params.signatures.iter())
            .enumerate()
        {
            if pubkey.len() != PUBKEY_LENGTH {
                return Err(StakingError::InvalidPubkeyLength {
                    index,
                    length: pubkey.len(),
                });
            }
            if signature.len() != DEPOSIT_SIGNATURE_LENGTH {
                return Err(StakingError::InvalidSignatureLength {
                    index,
                    length: signature.len(),
                });
            }

            let data = DepositData {
                pubkey: BlsPubkey::from_slice(pubkey),
                withdrawal_credentials: credentials,
                amount_gwei: DEPOSIT_AMOUNT_GWEI,
                signature: BlsSignature::from_slice(signature),
            };
            let root = data.root();
            tracing::debug!(index, pubkey = %data.pubkey, root = %root, "Deposit data prepared");

            records.push(ValidatorRecord {
                pubkey: data.pubkey,
                claim_address: params.claim_addr,
                extra_data: params.extra_data,
                exiting: false,
            });
            deposits.push((data, root));
        }

        vault.join_with(self.address, params.claim_addr, staked, || {
            deposit_contract.deposit_batch(&deposits, unit)
        })?;

        let total_tips = {
            let mut state = self.state.write();
            state.signed_params.insert(params_hash);
            for record in records {
                state.push_validator(record);
            }
            state.total_tips += request.tips;
            state.total_tips
        };

        STAKING_VALIDATORS_STAKED.inc_by(count as f64);
        STAKING_DEPOSITS_FORWARDED.inc_by(count as f64);
        STAKING_TIPS_COLLECTED.set(to_f64(total_tips));

        tracing::info!(
            caller = %caller,
            claim_address = %params.claim_addr,
            validators = count,
            value = %value,
            tips = %request.tips,
            "Stake completed"
        );
        self.events.emit(StakingEvent::Staked { caller, value });
        Ok(count)
    }

    // ========================================================================
    // Exits
    // ========================================================================

    /// Queue validator `id` for exit. Only its claim address may call.
    pub fn exit(&self, caller: Address, id: u64) -> Result<()> {
        let _entry = self.enter()?;
        self.exit_validator(caller, id, true, false).map(|_| ())
    }

    /// Queue several validators for exit.
    ///
    /// Elements are independent: a failing element does not undo earlier
    /// successes. Returns one outcome per id.
    pub fn batch_exit(&self, caller: Address, ids: &[u64]) -> Result<Vec<Result<()>>> {
        let _entry = self.enter()?;
        if ids.len() > MAX_BATCH_SIZE {
            return Err(StakingError::BatchTooLarge {
                count: ids.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        Ok(ids
            .iter()
            .map(|&id| {
                self.exit_validator(caller, id, true, false)
                    .map(|_| ())
                    .inspect_err(|e| tracing::debug!(id, error = %e, "Batch exit element failed"))
            })
            .collect())
    }

    /// Queue validator `id` for exit without a claim-address check
    /// (manager-only). With `claim_rewards`, the claim address is paid its
    /// entire reward balance. Returns the amount paid.
    pub fn emergency_exit(&self, caller: Address, id: u64, claim_rewards: bool) -> Result<U256> {
        let _entry = self.enter()?;
        self.access.read().require(Role::Manager, &caller)?;
        let claimed = self.exit_validator(caller, id, false, claim_rewards)?;
        tracing::warn!(caller = %caller, id, claimed = %claimed, "Emergency exit");
        Ok(claimed)
    }

    fn exit_validator(
        &self,
        caller: Address,
        id: u64,
        require_claim_address: bool,
        claim_rewards: bool,
    ) -> Result<U256> {
        let claim_address = {
            let state = self.state.read();
            let record = state
                .validator(id)
                .ok_or(StakingError::ValidatorNotFound(id))?;
            if require_claim_address && record.claim_address != caller {
                return Err(StakingError::NotClaimAddress { id, caller });
            }
            if record.exiting {
                return Err(StakingError::AlreadyExiting(id));
            }
            record.claim_address
        };

        let vault = self.configured_vault()?;
        let claimed = if claim_rewards {
            vault.leave_and_claim(self.address, claim_address, deposit_value())?
        } else {
            vault.leave(self.address, claim_address, deposit_value())?;
            U256::ZERO
        };

        let queue_len = {
            let mut state = self.state.write();
            state.mark_exiting(id)?;
            state.exit_queue.len()
        };

        STAKING_VALIDATORS_EXITED.inc();
        STAKING_EXIT_QUEUE_LENGTH.set(queue_len as f64);
        tracing::info!(id, claim_address = %claim_address, "Validator queued for exit");
        self.events.emit(StakingEvent::ValidatorExited { id, claim_address });
        Ok(claimed)
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Replace the oracle (admin-only).
    pub fn set_oracle(&self, caller: Address, oracle: Address) -> Result<()> {
        self.access.read().require(Role::Admin, &caller)?;
        if oracle.is_zero() {
            return Err(StakingError::ZeroAddress("oracle"));
        }
        self.authorizer.write().set_oracle(oracle);

        tracing::info!(oracle = %oracle, "Oracle changed");
        self.events.emit(StakingEvent::OracleChanged { oracle });
        Ok(())
    }

    /// Replace the rewards vault (admin-only).
    pub fn set_vault(&self, caller: Address, vault: Arc<RewardsVault>) -> Result<()> {
        self.access.read().require(Role::Admin, &caller)?;
        let address = vault.address();
        *self.vault.write() = Some(vault);

        tracing::info!(vault = %address, "Vault changed");
        self.events.emit(StakingEvent::VaultChanged { vault: address });
        Ok(())
    }

    /// Replace the deposit contract (admin-only).
    pub fn set_deposit_contract(
        &self,
        caller: Address,
        deposit_contract: Arc<dyn DepositContract>,
    ) -> Result<()> {
        self.access.read().require(Role::Admin, &caller)?;
        let address = deposit_contract.address();
        *self.deposit_contract.write() = Some(deposit_contract);

        tracing::info!(deposit_contract = %address, "Deposit contract changed");
        self.events.emit(StakingEvent::DepositContractChanged {
            deposit_contract: address,
        });
        Ok(())
    }

    /// Switch off state-mutating entry points (pauser-only).
    pub fn pause(&self, caller: Address) -> Result<()> {
        if self.access.write().set_paused(&caller, true)? {
            tracing::warn!(account = %caller, "Gateway paused");
            self.events.emit(StakingEvent::Paused { account: caller });
        }
        Ok(())
    }

    /// Switch state-mutating entry points back on (pauser-only).
    pub fn unpause(&self, caller: Address) -> Result<()> {
        if self.access.write().set_paused(&caller, false)? {
            tracing::info!(account = %caller, "Gateway unpaused");
            self.events.emit(StakingEvent::Unpaused { account: caller });
        }
        Ok(())
    }

    /// Grant `role` to `account` (admin-only).
    pub fn grant_role(&self, caller: Address, role: Role, account: Address) -> Result<bool> {
        self.access.write().grant_role(&caller, role, account)
    }

    /// Revoke `role` from `account` (admin-only).
    pub fn revoke_role(&self, caller: Address, role: Role, account: Address) -> Result<bool> {
        self.access.write().revoke_role(&caller, role, &account)
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.access.read().has_role(role, account)
    }

    /// Whether the gateway is paused.
    pub fn is_paused(&self) -> bool {
        self.access.read().is_paused()
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Record of validator `id`, if registered.
    pub fn validator(&self, id: u64) -> Option<ValidatorRecord> {
        self.state.read().validator(id).cloned()
    }

    /// Validators with ids in `start..end`, clamped to the registry.
    pub fn validators(&self, start: u64, end: u64) -> Vec<ValidatorRecord> {
        let state = self.state.read();
        let (start, end) = clamp_range(start, end, state.validators.len());
        state.validators[start..end].to_vec()
    }

    /// Number of validators ever registered.
    pub fn validator_count(&self) -> u64 {
        self.state.read().validators.len() as u64
    }

    /// Exit queue entries at positions `start..end`, clamped to the queue.
    pub fn exit_queue(&self, start: u64, end: u64) -> Vec<u64> {
        let state = self.state.read();
        let (start, end) = clamp_range(start, end, state.exit_queue.len());
        state.exit_queue[start..end].to_vec()
    }

    /// Number of validators queued for exit.
    pub fn exit_queue_len(&self) -> u64 {
        self.state.read().exit_queue.len() as u64
    }

    /// Whether this raw authorization signature was already consumed.
    pub fn is_replayed(&self, params_sig: &[u8]) -> bool {
        self.state.read().is_replayed(&keccak256(params_sig))
    }

    /// Ids of every validator owned by `claim_address`.
    pub fn validators_of(&self, claim_address: &Address) -> Vec<u64> {
        self.state
            .read()
            .by_claim_address
            .get(claim_address)
            .cloned()
            .unwrap_or_default()
    }

    /// Tips collected across all stake requests.
    pub fn total_tips(&self) -> U256 {
        self.state.read().total_tips
    }

    /// EIP-712 domain separator of the gateway.
    pub fn domain_separator(&self) -> B256 {
        self.authorizer.read().domain_separator()
    }

    /// Address whose signature authorizes stake requests.
    pub fn oracle(&self) -> Address {
        self.authorizer.read().oracle()
    }

    /// Digest the oracle must sign to authorize `params`.
    pub fn stake_digest(&self, params: &StakeParams) -> B256 {
        self.authorizer.read().digest(params)
    }

    /// Rewards vault receiving pool shares.
    pub fn vault(&self) -> Option<Arc<RewardsVault>> {
        self.vault.read().clone()
    }

    /// Address of the configured deposit contract.
    pub fn deposit_contract_address(&self) -> Option<Address> {
        self.deposit_contract.read().as_ref().map(|c| c.address())
    }

    /// Main precompile entry point.
    ///
    /// Decodes the call against [`IDirectStaking`] and routes to the
    /// matching handler. Only `stake` accepts value.
    pub fn run(
        &self,
        input: &Bytes,
        gas_limit: u64,
        caller: Address,
        value: U256,
    ) -> PrecompileResult {
        let call = decode_calls::<IDirectStakingCalls>(input)?;
        if !value.is_zero() && !matches!(call, IDirectStakingCalls::stake(_)) {
            return Err(PrecompileError::Fatal(
                "Function is not payable".to_string(),
            ));
        }

        match call {
            IDirectStakingCalls::stake(call) => {
                let gas_cost =
                    gas::STAKE_BASE + gas::STAKE_PER_VALIDATOR * call.pubkeys.len() as u64;
                charge(gas_limit, gas_cost)?;

                let request = StakeRequest {
                    params: StakeParams {
                        extra_data: call.extraData,
                        claim_addr: call.claimaddr,
                        withdraw_addr: call.withdrawaddr,
                        pubkeys: call.pubkeys,
                        signatures: call.signatures,
                    },
                    params_sig: call.paramsSig,
                    tips: call.tips,
                };
                self.stake(caller, value, &request)?;
                Ok(success(gas_cost, Bytes::new()))
            }
            IDirectStakingCalls::exit(call) => {
                charge(gas_limit, gas::EXIT)?;
                self.exit(caller, validator_id(call.id)?)?;
                Ok(success(gas::EXIT, Bytes::new()))
            }
            IDirectStakingCalls::batchExit(call) => {
                let gas_cost = gas::BATCH_EXIT_PER_VALIDATOR * call.ids.len() as u64;
                charge(gas_limit, gas_cost)?;

                let ids = call
                    .ids
                    .iter()
                    .map(|id| validator_id(*id))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                let outcomes: Vec<bool> = self
                    .batch_exit(caller, &ids)?
                    .iter()
                    .map(|outcome| outcome.is_ok())
                    .collect();
                Ok(success(gas_cost, outcomes.abi_encode().into()))
            }
            IDirectStakingCalls::emergencyExit(call) => {
                charge(gas_limit, gas::EMERGENCY_EXIT)?;
                self.emergency_exit(caller, validator_id(call.id)?, call.toClaimAddress)?;
                Ok(success(gas::EMERGENCY_EXIT, Bytes::new()))
            }
            IDirectStakingCalls::setOracle(call) => {
                charge(gas_limit, gas::SET_ORACLE)?;
                self.set_oracle(caller, call.oracle)?;
                Ok(success(gas::SET_ORACLE, Bytes::new()))
            }
            IDirectStakingCalls::pause(_) => {
                charge(gas_limit, gas::PAUSE)?;
                self.pause(caller)?;
                Ok(success(gas::PAUSE, Bytes::new()))
            }
            IDirectStakingCalls::unpause(_) => {
                charge(gas_limit, gas::PAUSE)?;
                self.unpause(caller)?;
                Ok(success(gas::PAUSE, Bytes::new()))
            }
            IDirectStakingCalls::getValidatorCount(_) => {
                charge(gas_limit, gas::VIEW)?;
                let count = U256::from(self.validator_count());
                Ok(success(gas::VIEW, count.abi_encode().into()))
            }
            IDirectStakingCalls::getValidator(call) => {
                charge(gas_limit, gas::VIEW)?;
                let id = validator_id(call.id)?;
                let record = self
                    .validator(id)
                    .ok_or(StakingError::ValidatorNotFound(id))?;
                let output = (
                    Bytes::copy_from_slice(record.pubkey.as_slice()),
                    record.claim_address,
                    record.extra_data,
                    record.exiting,
                )
                    .abi_encode_params();
                Ok(success(gas::VIEW, output.into()))
            }
            IDirectStakingCalls::getExitQueueLength(_) => {
                charge(gas_limit, gas::VIEW)?;
                let len = U256::from(self.exit_queue_len());
                Ok(success(gas::VIEW, len.abi_encode().into()))
            }
            IDirectStakingCalls::getExitQueue(call) => {
                let start = call.start.saturating_to::<u64>();
                let end = call.end.saturating_to::<u64>();
                let ids: Vec<U256> = self
                    .exit_queue(start, end)
                    .into_iter()
                    .map(U256::from)
                    .collect();

                let gas_cost = gas::VIEW + gas::VIEW_PER_ITEM * ids.len() as u64;
                charge(gas_limit, gas_cost)?;
                Ok(success(gas_cost, ids.abi_encode().into()))
            }
            IDirectStakingCalls::isReplayed(call) => {
                charge(gas_limit, gas::VIEW)?;
                let replayed = self.is_replayed(&call.paramsSig);
                Ok(success(gas::VIEW, replayed.abi_encode().into()))
            }
            IDirectStakingCalls::getTotalTips(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(gas::VIEW, self.total_tips().abi_encode().into()))
            }
            IDirectStakingCalls::getOracle(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(gas::VIEW, self.oracle().abi_encode().into()))
            }
            IDirectStakingCalls::domainSeparator(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(
                    gas::VIEW,
                    self.domain_separator().abi_encode().into(),
                ))
            }
        }
    }
}

fn validator_id(id: U256) -> std::result::Result<u64, PrecompileError> {
    u64::try_from(id).map_err(|_| PrecompileError::Fatal(format!("Validator id {id} out of range")))
}

fn clamp_range(start: u64, end: u64, len: usize) -> (usize, usize) {
    let end = usize::try_from(end).unwrap_or(usize::MAX).min(len);
    let start = usize::try_from(start).unwrap_or(usize::MAX).min(end);
    (start, end)
}
