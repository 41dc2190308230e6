//! Rewards vault precompile.
//!
//! Distributes native value that arrives at the vault to pool members in
//! proportion to their shares, using an accumulated-reward-per-share
//! accumulator:
//! - `update_reward` lazily realizes unaccounted balance into `acc_share`
//! - members are settled against `acc_share` before their shares change
//! - a manager fee (thousandths of each realized reward) is set aside
//!
//! Settlement is O(1) per member regardless of pool size. Every division
//! truncates toward zero, leaving dust in the vault.

use crate::access::{AccessControl, EntryToken, ReentrancyGuard, Role};
use crate::config::{StakingConfig, FEE_SHARE_DENOMINATOR};
use crate::error::{Result, StakingError};
use crate::events::{EventLog, StakingEvent};
use crate::ledger::ValueTransfer;
use crate::precompiles::{charge, decode_calls, success, to_f64};
use alloy_primitives::{uint, Address, Bytes, U256};
use alloy_sol_types::{sol, SolValue};
use lynx_metrics::vault::{
    VAULT_MANAGER_REVENUE, VAULT_MANAGER_WITHDRAWALS, VAULT_MEMBERS, VAULT_REWARDS_CLAIMED,
    VAULT_REWARDS_REALIZED, VAULT_TOTAL_SHARES,
};
use parking_lot::RwLock;
use revm::precompile::{PrecompileError, PrecompileResult};
use std::{collections::HashMap, fmt, sync::Arc};

/// Fixed-point scale of `acc_share`.
pub const MULTIPLIER: U256 = uint!(1_000_000_000_000_000_000_U256);

/// Gas costs for vault operations.
pub mod gas {
    /// Gas cost for a plain value receive.
    pub const RECEIVE: u64 = 5_000;

    /// Gas cost for updateReward.
    pub const UPDATE_REWARD: u64 = 10_000;

    /// Gas cost for joinVault / leaveVault.
    pub const MEMBERSHIP: u64 = 25_000;

    /// Gas cost for claimRewards / claimRewardsFor.
    pub const CLAIM: u64 = 30_000;

    /// Gas cost for withdrawManagerRevenue.
    pub const WITHDRAW_MANAGER_REVENUE: u64 = 30_000;

    /// Gas cost for setManagerFeeShare.
    pub const SET_MANAGER_FEE_SHARE: u64 = 15_000;

    /// Gas cost for pause / unpause.
    pub const PAUSE: u64 = 10_000;

    /// Gas cost for read-only queries.
    pub const VIEW: u64 = 2_100;
}

sol! {
    /// Rewards vault interface.
    interface IRewardsVault {
        /// Claim `amount` of the caller's rewards to `beneficiary`.
        /// Gas: 30,000
        function claimRewards(address beneficiary, uint256 amount) external;

        /// Add shares for `member` (controller-only).
        /// Gas: 25,000
        function joinVault(address member, uint256 amount) external;

        /// Remove shares of `member` (controller-only).
        /// Gas: 25,000
        function leaveVault(address member, uint256 amount) external;

        /// Pay `member` its entire reward balance (controller-only).
        /// Gas: 30,000
        function claimRewardsFor(address member) external returns (uint256);

        /// Withdraw manager revenue (manager-only).
        /// Gas: 30,000
        function withdrawManagerRevenue(uint256 amount, address to) external;

        /// Set the manager fee share in thousandths (manager-only).
        /// Gas: 15,000
        function setManagerFeeShare(uint256 milli) external;

        /// Realize unaccounted balance.
        /// Gas: 10,000
        function updateReward() external;

        /// Pause state-mutating entry points (pauser-only).
        function pause() external;

        /// Unpause state-mutating entry points (pauser-only).
        function unpause() external;

        function getPendingReward(address account) external view returns (uint256);
        function getPendingManagerRevenue() external view returns (uint256);
        function getMember(address account) external view returns (uint256 accSharePoint, uint256 amount, uint256 rewardBalance);
        function getTotalShares() external view returns (uint256);
        function getAccShare() external view returns (uint256);
        function getAccountedBalance() external view returns (uint256);
        function getManagerFeeShare() external view returns (uint256);
    }
}

use IRewardsVault::IRewardsVaultCalls;

/// Per-member bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolMember {
    /// `acc_share` at the last settlement.
    pub acc_share_point: U256,
    /// Current shares.
    pub amount: U256,
    /// Settled, claimable reward.
    pub reward_balance: U256,
}

impl PoolMember {
    /// Reward owed on top of `reward_balance` if settled against `acc_share`.
    fn accrued(&self, acc_share: U256) -> U256 {
        (acc_share - self.acc_share_point) * self.amount / MULTIPLIER
    }

    fn settle(&mut self, acc_share: U256) {
        self.reward_balance += self.accrued(acc_share);
        self.acc_share_point = acc_share;
    }
}

/// Vault accounting state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultState {
    /// Native value held: received minus paid out.
    pub balance: U256,
    /// Portion of `balance` already realized into the accumulator.
    pub accounted_balance: U256,
    /// Sum of all member shares.
    pub total_shares: U256,
    /// Accumulated reward per share, scaled by [`MULTIPLIER`].
    pub acc_share: U256,
    /// Fee pool owed to the manager.
    pub manager_revenue: U256,
    /// Manager fee in thousandths.
    pub manager_fee_share: U256,
    /// Members by address.
    pub members: HashMap<Address, PoolMember>,
}

impl VaultState {
    /// Empty state with the given fee share.
    pub fn with_fee_share(manager_fee_share: U256) -> Self {
        Self {
            manager_fee_share,
            ..Default::default()
        }
    }

    /// `(acc_share, manager_revenue)` as they would be after `update_reward`.
    fn projected(&self) -> (U256, U256) {
        if self.balance <= self.accounted_balance || self.total_shares.is_zero() {
            return (self.acc_share, self.manager_revenue);
        }

        let reward = self.balance - self.accounted_balance;
        let manager_reward =
            reward * self.manager_fee_share / U256::from(FEE_SHARE_DENOMINATOR);
        let pool_reward = reward - manager_reward;
        (
            self.acc_share + pool_reward * MULTIPLIER / self.total_shares,
            self.manager_revenue + manager_reward,
        )
    }

    /// Realize unaccounted balance. Returns the realized amount.
    pub fn update_reward(&mut self) -> U256 {
        if self.balance <= self.accounted_balance || self.total_shares.is_zero() {
            return U256::ZERO;
        }

        let reward = self.balance - self.accounted_balance;
        let (acc_share, manager_revenue) = self.projected();
        self.acc_share = acc_share;
        self.manager_revenue = manager_revenue;
        self.accounted_balance = self.balance;
        reward
    }

    /// Credit `account` with everything accrued since its last settlement,
    /// creating its entry if needed.
    fn settle(&mut self, account: Address) -> &mut PoolMember {
        let acc_share = self.acc_share;
        let member = self.members.entry(account).or_default();
        member.settle(acc_share);
        member
    }

    /// Like [`settle`](Self::settle), but never creates an entry.
    fn settle_existing(&mut self, account: Address) -> Option<&mut PoolMember> {
        let acc_share = self.acc_share;
        let member = self.members.get_mut(&account)?;
        member.settle(acc_share);
        Some(member)
    }

    /// Record value arriving at the vault.
    pub fn receive(&mut self, amount: U256) {
        self.balance += amount;
    }

    /// Settle `account`, then add `amount` shares.
    pub fn join(&mut self, account: Address, amount: U256) {
        self.update_reward();
        self.settle(account).amount += amount;
        self.total_shares += amount;
    }

    /// Settle `account`, then remove `amount` shares.
    pub fn leave(&mut self, account: Address, amount: U256) -> Result<()> {
        self.update_reward();
        let member = self.settle(account);
        if amount > member.amount {
            return Err(StakingError::InsufficientShares {
                member: account,
                available: member.amount,
                requested: amount,
            });
        }
        member.amount -= amount;
        self.total_shares -= amount;
        Ok(())
    }

    /// Take `amount` out of the reward balance of `account` for payout.
    pub fn claim(&mut self, account: Address, amount: U256) -> Result<()> {
        self.update_reward();
        let available = self
            .settle_existing(account)
            .map_or(U256::ZERO, |member| member.reward_balance);
        if amount > available {
            return Err(StakingError::InsufficientReward {
                available,
                requested: amount,
            });
        }
        if let Some(member) = self.members.get_mut(&account) {
            member.reward_balance -= amount;
        }
        self.pay_out(amount);
        Ok(())
    }

    /// Take the entire reward balance of `account` for payout.
    pub fn claim_all(&mut self, account: Address) -> U256 {
        self.update_reward();
        let amount = self
            .settle_existing(account)
            .map_or(U256::ZERO, |member| std::mem::take(&mut member.reward_balance));
        self.pay_out(amount);
        amount
    }

    /// Take `amount` of manager revenue for payout.
    pub fn withdraw_manager_revenue(&mut self, amount: U256) -> Result<()> {
        self.update_reward();
        if amount > self.manager_revenue {
            return Err(StakingError::InsufficientRevenue {
                available: self.manager_revenue,
                requested: amount,
            });
        }
        self.manager_revenue -= amount;
        self.pay_out(amount);
        Ok(())
    }

    /// Change the fee share after realizing pending rewards at the old rate.
    pub fn set_manager_fee_share(&mut self, milli: U256) -> Result<()> {
        if milli > U256::from(FEE_SHARE_DENOMINATOR) {
            return Err(StakingError::FeeShareOutOfRange(milli));
        }
        self.update_reward();
        self.manager_fee_share = milli;
        Ok(())
    }

    fn pay_out(&mut self, amount: U256) {
        self.accounted_balance -= amount;
        self.balance -= amount;
    }

    /// Reward `account` could claim after an update, without mutating.
    pub fn pending_reward(&self, account: &Address) -> U256 {
        let (acc_share, _) = self.projected();
        self.members
            .get(account)
            .map(|m| m.reward_balance + m.accrued(acc_share))
            .unwrap_or(U256::ZERO)
    }

    /// Manager revenue after an update, without mutating.
    pub fn pending_manager_revenue(&self) -> U256 {
        self.projected().1
    }

    /// Members currently holding shares.
    pub fn active_members(&self) -> usize {
        self.members.values().filter(|m| !m.amount.is_zero()).count()
    }
}

/// Rewards vault implementation.
///
/// Thread-safe using Arc<RwLock<VaultState>>. Payouts run after the
/// accounting is committed and the state lock is released; the single-entry
/// guard stays held, and a failed payout restores the pre-call state.
pub struct RewardsVault {
    address: Address,
    state: Arc<RwLock<VaultState>>,
    access: RwLock<AccessControl>,
    guard: ReentrancyGuard,
    transfer: Arc<dyn ValueTransfer>,
    events: EventLog,
}

impl fmt::Debug for RewardsVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewardsVault")
            .field("address", &self.address)
            .field("state", &self.state)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

impl RewardsVault {
    /// Create an empty vault with `admin` holding the admin role.
    pub fn new(address: Address, admin: Address, transfer: Arc<dyn ValueTransfer>) -> Self {
        Self::with_state(address, admin, transfer, VaultState::default())
    }

    /// Create with existing state (for testing).
    pub fn with_state(
        address: Address,
        admin: Address,
        transfer: Arc<dyn ValueTransfer>,
        state: VaultState,
    ) -> Self {
        Self {
            address,
            state: Arc::new(RwLock::new(state)),
            access: RwLock::new(AccessControl::new(admin)),
            guard: ReentrancyGuard::new(),
            transfer,
            events: EventLog::new(),
        }
    }

    /// Create from deployment config.
    ///
    /// Grants manager and pauser from the config and the controller role to
    /// the gateway.
    pub fn from_config(config: &StakingConfig, transfer: Arc<dyn ValueTransfer>) -> Result<Self> {
        config.validate()?;

        let state = VaultState::with_fee_share(U256::from(config.manager_fee_share));
        let vault = Self::with_state(config.vault_address, config.admin, transfer, state);
        {
            let mut access = vault.access.write();
            access.grant_role(&config.admin, Role::Manager, config.manager)?;
            access.grant_role(&config.admin, Role::Pauser, config.pauser)?;
            access.grant_role(&config.admin, Role::Controller, config.gateway_address)?;
        }

        tracing::info!(
            vault = %config.vault_address,
            controller = %config.gateway_address,
            manager_fee_share = config.manager_fee_share,
            "Initialized rewards vault from config"
        );
        Ok(vault)
    }

    /// Address of the vault.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get a reference to the current state (for testing/queries).
    pub fn state(&self) -> Arc<RwLock<VaultState>> {
        Arc::clone(&self.state)
    }

    /// Events recorded by the vault.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Take the entry guard and check the pause flag.
    fn enter(&self) -> Result<EntryToken<'_>> {
        let token = self.guard.enter()?;
        self.access.read().require_not_paused()?;
        Ok(token)
    }

    fn require(&self, role: Role, caller: &Address) -> Result<()> {
        self.access.read().require(role, caller)
    }

    /// Apply `op` to the state all-or-nothing.
    ///
    /// Returns the op's value and the pre-call state for payout rollback.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut VaultState) -> Result<T>,
    ) -> Result<(T, VaultState)> {
        let mut state = self.state.write();
        let snapshot = state.clone();

        match op(&mut state) {
            Ok(value) => {
                if state.acc_share != snapshot.acc_share
                    || state.manager_revenue > snapshot.manager_revenue
                {
                    VAULT_REWARDS_REALIZED.inc();
                    tracing::debug!(
                        acc_share = %state.acc_share,
                        manager_revenue = %state.manager_revenue,
                        "Vault reward realized"
                    );
                }
                VAULT_TOTAL_SHARES.set(to_f64(state.total_shares));
                VAULT_MEMBERS.set(state.active_members() as f64);
                VAULT_MANAGER_REVENUE.set(to_f64(state.manager_revenue));
                Ok((value, snapshot))
            }
            Err(e) => {
                *state = snapshot;
                Err(e)
            }
        }
    }

    /// Send `amount` to `to`; on failure restore `snapshot`.
    fn pay(&self, snapshot: VaultState, to: Address, amount: U256) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        if let Err(e) = self.transfer.transfer(to, amount) {
            tracing::warn!(to = %to, amount = %amount, error = %e, "Vault payout failed, rolling back");
            let mut state = self.state.write();
            *state = snapshot;
            VAULT_TOTAL_SHARES.set(to_f64(state.total_shares));
            VAULT_MANAGER_REVENUE.set(to_f64(state.manager_revenue));
            return Err(e);
        }
        Ok(())
    }

    /// Record value arriving at the vault (execution-layer rewards).
    ///
    /// The inflow is realized by the next `update_reward`.
    pub fn receive(&self, amount: U256) -> Result<()> {
        let _entry = self.guard.enter()?;
        self.state.write().receive(amount);
        tracing::debug!(amount = %amount, "Vault received value");
        Ok(())
    }

    /// Realize unaccounted balance into the accumulator.
    ///
    /// Returns the realized amount.
    pub fn update_reward(&self) -> Result<U256> {
        let _entry = self.enter()?;
        let (realized, _) = self.transact(|state| Ok(state.update_reward()))?;
        Ok(realized)
    }

    /// Add `amount` shares for `member` (controller-only).
    pub fn join(&self, caller: Address, member: Address, amount: U256) -> Result<()> {
        self.join_with(caller, member, amount, || Ok(()))
    }

    /// Add `amount` shares for `member` once `forward` succeeds
    /// (controller-only).
    ///
    /// The entry guard, pause and role checks are taken before `forward`
    /// runs and held until the shares are booked, so a failure on either
    /// side leaves both untouched. `forward` cannot re-enter the vault.
    pub fn join_with(
        &self,
        caller: Address,
        member: Address,
        amount: U256,
        forward: impl FnOnce() -> Result<()>,
    ) -> Result<()> {
        let _entry = self.enter()?;
        self.require(Role::Controller, &caller)?;
        forward()?;
        self.transact(|state| {
            state.join(member, amount);
            Ok(())
        })?;

        tracing::info!(member = %member, amount = %amount, "Pool joined");
        self.events.emit(StakingEvent::PoolJoined { member, amount });
        Ok(())
    }

    /// Remove `amount` shares of `member` (controller-only).
    pub fn leave(&self, caller: Address, member: Address, amount: U256) -> Result<()> {
        let _entry = self.enter()?;
        self.require(Role::Controller, &caller)?;
        self.transact(|state| state.leave(member, amount))?;

        tracing::info!(member = %member, amount = %amount, "Pool left");
        self.events.emit(StakingEvent::PoolLeft { member, amount });
        Ok(())
    }

    /// Claim `amount` of the caller's own rewards to `beneficiary`.
    pub fn claim(&self, caller: Address, beneficiary: Address, amount: U256) -> Result<()> {
        let _entry = self.enter()?;
        if beneficiary.is_zero() {
            return Err(StakingError::ZeroAddress("beneficiary"));
        }

        let ((), snapshot) = self.transact(|state| state.claim(caller, amount))?;
        self.pay(snapshot, beneficiary, amount)?;

        VAULT_REWARDS_CLAIMED.inc();
        tracing::info!(member = %caller, beneficiary = %beneficiary, amount = %amount, "Rewards claimed");
        self.events.emit(StakingEvent::RewardClaimed {
            member: caller,
            beneficiary,
            amount,
        });
        Ok(())
    }

    /// Pay `member` its entire reward balance (controller-only).
    pub fn claim_for(&self, caller: Address, member: Address) -> Result<U256> {
        let _entry = self.enter()?;
        self.require(Role::Controller, &caller)?;
        let (amount, snapshot) = self.transact(|state| Ok(state.claim_all(member)))?;
        self.pay(snapshot, member, amount)?;

        VAULT_REWARDS_CLAIMED.inc();
        tracing::info!(member = %member, amount = %amount, "Rewards claimed on behalf of member");
        self.events.emit(StakingEvent::RewardClaimed {
            member,
            beneficiary: member,
            amount,
        });
        Ok(amount)
    }

    /// Remove `amount` shares of `member` and pay it its entire reward
    /// balance, as one operation (controller-only).
    pub fn leave_and_claim(&self, caller: Address, member: Address, amount: U256) -> Result<U256> {
        let _entry = self.enter()?;
        self.require(Role::Controller, &caller)?;
        let (claimed, snapshot) = self.transact(|state| {
            state.leave(member, amount)?;
            Ok(state.claim_all(member))
        })?;
        self.pay(snapshot, member, claimed)?;

        VAULT_REWARDS_CLAIMED.inc();
        tracing::info!(member = %member, amount = %amount, claimed = %claimed, "Pool left with claim");
        self.events.emit_all([
            StakingEvent::PoolLeft { member, amount },
            StakingEvent::RewardClaimed {
                member,
                beneficiary: member,
                amount: claimed,
            },
        ]);
        Ok(claimed)
    }

    /// Withdraw `amount` of manager revenue to `to` (manager-only).
    pub fn withdraw_manager_revenue(&self, caller: Address, amount: U256, to: Address) -> Result<()> {
        let _entry = self.enter()?;
        self.require(Role::Manager, &caller)?;
        if to.is_zero() {
            return Err(StakingError::ZeroAddress("revenue recipient"));
        }

        let ((), snapshot) = self.transact(|state| state.withdraw_manager_revenue(amount))?;
        self.pay(snapshot, to, amount)?;

        VAULT_MANAGER_WITHDRAWALS.inc();
        tracing::info!(to = %to, amount = %amount, "Manager revenue withdrawn");
        self.events
            .emit(StakingEvent::ManagerRevenueWithdrawn { to, amount });
        Ok(())
    }

    /// Set the manager fee share in thousandths (manager-only).
    pub fn set_manager_fee_share(&self, caller: Address, milli: U256) -> Result<()> {
        let _entry = self.enter()?;
        self.require(Role::Manager, &caller)?;
        self.transact(|state| state.set_manager_fee_share(milli))?;

        tracing::info!(milli = %milli, "Manager fee share changed");
        self.events
            .emit(StakingEvent::ManagerFeeShareChanged { milli });
        Ok(())
    }

    /// Switch off state-mutating entry points (pauser-only).
    pub fn pause(&self, caller: Address) -> Result<()> {
        if self.access.write().set_paused(&caller, true)? {
            tracing::warn!(account = %caller, "Vault paused");
            self.events.emit(StakingEvent::Paused { account: caller });
        }
        Ok(())
    }

    /// Switch state-mutating entry points back on (pauser-only).
    pub fn unpause(&self, caller: Address) -> Result<()> {
        if self.access.write().set_paused(&caller, false)? {
            tracing::info!(account = %caller, "Vault unpaused");
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

    /// Whether the vault is paused.
    pub fn is_paused(&self) -> bool {
        self.access.read().is_paused()
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Reward `account` could claim right now.
    pub fn pending_reward(&self, account: &Address) -> U256 {
        self.state.read().pending_reward(account)
    }

    /// Manager revenue that could be withdrawn right now.
    pub fn pending_manager_revenue(&self) -> U256 {
        self.state.read().pending_manager_revenue()
    }

    /// Bookkeeping of `account`, if it ever joined.
    pub fn member(&self, account: &Address) -> Option<PoolMember> {
        self.state.read().members.get(account).cloned()
    }

    /// Sum of all member shares.
    pub fn total_shares(&self) -> U256 {
        self.state.read().total_shares
    }

    /// Accumulated reward per share, scaled by [`MULTIPLIER`].
    pub fn acc_share(&self) -> U256 {
        self.state.read().acc_share
    }

    /// Part of the balance already realized into the accumulator.
    pub fn accounted_balance(&self) -> U256 {
        self.state.read().accounted_balance
    }

    /// Native value held by the vault.
    pub fn balance(&self) -> U256 {
        self.state.read().balance
    }

    /// Manager cut of realized rewards, in thousandths.
    pub fn manager_fee_share(&self) -> U256 {
        self.state.read().manager_fee_share
    }

    /// Main precompile entry point.
    ///
    /// Empty input with value attached is a plain receive; otherwise the
    /// call data is decoded against [`IRewardsVault`].
    pub fn run(
        &self,
        input: &Bytes,
        gas_limit: u64,
        caller: Address,
        value: U256,
    ) -> PrecompileResult {
        if input.is_empty() {
            if value.is_zero() {
                return Err(PrecompileError::Fatal("Empty call without value".to_string()));
            }
            charge(gas_limit, gas::RECEIVE)?;
            self.receive(value)?;
            return Ok(success(gas::RECEIVE, Bytes::new()));
        }
        if !value.is_zero() {
            return Err(PrecompileError::Fatal(
                "Function is not payable".to_string(),
            ));
        }

        match decode_calls::<IRewardsVaultCalls>(input)? {
            IRewardsVaultCalls::claimRewards(call) => {
                charge(gas_limit, gas::CLAIM)?;
                self.claim(caller, call.beneficiary, call.amount)?;
                Ok(success(gas::CLAIM, Bytes::new()))
            }
            IRewardsVaultCalls::joinVault(call) => {
                charge(gas_limit, gas::MEMBERSHIP)?;
                self.join(caller, call.member, call.amount)?;
                Ok(success(gas::MEMBERSHIP, Bytes::new()))
            }
            IRewardsVaultCalls::leaveVault(call) => {
                charge(gas_limit, gas::MEMBERSHIP)?;
                self.leave(caller, call.member, call.amount)?;
                Ok(success(gas::MEMBERSHIP, Bytes::new()))
            }
            IRewardsVaultCalls::claimRewardsFor(call) => {
                charge(gas_limit, gas::CLAIM)?;
                let amount = self.claim_for(caller, call.member)?;
                Ok(success(gas::CLAIM, amount.abi_encode().into()))
            }
            IRewardsVaultCalls::withdrawManagerRevenue(call) => {
                charge(gas_limit, gas::WITHDRAW_MANAGER_REVENUE)?;
                self.withdraw_manager_revenue(caller, call.amount, call.to)?;
                Ok(success(gas::WITHDRAW_MANAGER_REVENUE, Bytes::new()))
            }
            IRewardsVaultCalls::setManagerFeeShare(call) => {
                charge(gas_limit, gas::SET_MANAGER_FEE_SHARE)?;
                self.set_manager_fee_share(caller, call.milli)?;
                Ok(success(gas::SET_MANAGER_FEE_SHARE, Bytes::new()))
            }
            IRewardsVaultCalls::updateReward(_) => {
                charge(gas_limit, gas::UPDATE_REWARD)?;
                self.update_reward()?;
                Ok(success(gas::UPDATE_REWARD, Bytes::new()))
            }
            IRewardsVaultCalls::pause(_) => {
                charge(gas_limit, gas::PAUSE)?;
                self.pause(caller)?;
                Ok(success(gas::PAUSE, Bytes::new()))
            }
            IRewardsVaultCalls::unpause(_) => {
                charge(gas_limit, gas::PAUSE)?;
                self.unpause(caller)?;
                Ok(success(gas::PAUSE, Bytes::new()))
            }
            IRewardsVaultCalls::getPendingReward(call) => {
                charge(gas_limit, gas::VIEW)?;
                let pending = self.pending_reward(&call.account);
                Ok(success(gas::VIEW, pending.abi_encode().into()))
            }
            IRewardsVaultCalls::getPendingManagerRevenue(_) => {
                charge(gas_limit, gas::VIEW)?;
                let pending = self.pending_manager_revenue();
                Ok(success(gas::VIEW, pending.abi_encode().into()))
            }
            IRewardsVaultCalls::getMember(call) => {
                charge(gas_limit, gas::VIEW)?;
                let member = self.member(&call.account).unwrap_or_default();
                let output = (member.acc_share_point, member.amount, member.reward_balance)
                    .abi_encode_params();
                Ok(success(gas::VIEW, output.into()))
            }
            IRewardsVaultCalls::getTotalShares(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(gas::VIEW, self.total_shares().abi_encode().into()))
            }
            IRewardsVaultCalls::getAccShare(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(gas::VIEW, self.acc_share().abi_encode().into()))
            }
            IRewardsVaultCalls::getAccountedBalance(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(gas::VIEW, self.accounted_balance().abi_encode().into()))
            }
            IRewardsVaultCalls::getManagerFeeShare(_) => {
                charge(gas_limit, gas::VIEW)?;
                Ok(success(gas::VIEW, self.manager_fee_share().abi_encode().into()))
            }
        }
    }
}
