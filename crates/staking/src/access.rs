//! Role checks, pause switch and single-entry guard.
//!
//! Permission checks run once at the top of each entry point against the
//! caller identity; the state types behind them know nothing of roles.

use crate::error::{Result, StakingError};
use alloy_primitives::Address;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Capabilities a caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Grants and revokes roles, rewires collaborators.
    Admin,
    /// Emergency exits, fee share and manager revenue.
    Manager,
    /// Vault membership on behalf of members (held by the gateway).
    Controller,
    /// Pause and unpause.
    Pauser,
}

impl Role {
    /// Stable name used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Controller => "CONTROLLER",
            Role::Pauser => "PAUSER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role membership plus the pause flag of one contract.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    members: HashMap<Role, HashSet<Address>>,
    paused: bool,
}

impl AccessControl {
    /// Create with `admin` holding the admin role.
    pub fn new(admin: Address) -> Self {
        let mut access = Self::default();
        access.insert(Role::Admin, admin);
        access
    }

    fn insert(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|members| members.contains(account))
    }

    /// Fail with `Unauthorized` unless `caller` holds `role`.
    pub fn require(&self, role: Role, caller: &Address) -> Result<()> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            Err(StakingError::Unauthorized {
                caller: *caller,
                role: role.as_str(),
            })
        }
    }

    /// Grant `role` to `account` (admin only). Returns whether it was newly granted.
    pub fn grant_role(&mut self, caller: &Address, role: Role, account: Address) -> Result<bool> {
        self.require(Role::Admin, caller)?;
        if account.is_zero() {
            return Err(StakingError::ZeroAddress("role account"));
        }
        let granted = self.insert(role, account);
        if granted {
            tracing::info!(role = %role, account = %account, "Role granted");
        }
        Ok(granted)
    }

    /// Revoke `role` from `account` (admin only). Returns whether it was held.
    pub fn revoke_role(&mut self, caller: &Address, role: Role, account: &Address) -> Result<bool> {
        self.require(Role::Admin, caller)?;
        let revoked = self
            .members
            .get_mut(&role)
            .is_some_and(|members| members.remove(account));
        if revoked {
            tracing::info!(role = %role, account = %account, "Role revoked");
        }
        Ok(revoked)
    }

    /// Whether state-mutating entry points are switched off.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fail with `Paused` while paused.
    pub fn require_not_paused(&self) -> Result<()> {
        if self.paused {
            Err(StakingError::Paused)
        } else {
            Ok(())
        }
    }

    /// Set the pause flag (pauser only). Returns whether the flag changed.
    pub fn set_paused(&mut self, caller: &Address, paused: bool) -> Result<bool> {
        self.require(Role::Pauser, caller)?;
        let changed = self.paused != paused;
        self.paused = paused;
        Ok(changed)
    }
}

/// Single-entry guard shared by all state-mutating entry points of a contract.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: AtomicBool,
}

impl ReentrancyGuard {
    /// Create an unlocked guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the guard for the duration of the returned token.
    ///
    /// Fails with `Reentrancy` while another entry is in flight.
    pub fn enter(&self) -> Result<EntryToken<'_>> {
        self.entered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StakingError::Reentrancy)?;
        Ok(EntryToken { guard: self })
    }

    /// Whether an entry is in flight.
    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

/// Held while an entry point runs; releases the guard on drop.
#[must_use = "the guard is released as soon as the token is dropped"]
pub struct EntryToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for EntryToken<'_> {
    fn drop(&mut self) {
        self.guard.entered.store(false, Ordering::Release);
    }
}
