//! Rewards vault metrics.

use once_cell::sync::Lazy;
use prometheus::{Counter, Gauge, Registry};

// Membership
pub static VAULT_TOTAL_SHARES: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new(
        "lynx_vault_total_shares_wei",
        "Sum of all pool member shares",
    )
    .expect("metric can be created")
});

pub static VAULT_MEMBERS: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new("lynx_vault_members", "Pool members with a non-zero share")
        .expect("metric can be created")
});

// Rewards
pub static VAULT_REWARDS_REALIZED: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "lynx_vault_rewards_realized_total",
        "Reward updates that realized new inflow into the accumulator",
    )
    .expect("metric can be created")
});

pub static VAULT_REWARDS_CLAIMED: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "lynx_vault_rewards_claimed_total",
        "Successful reward claims",
    )
    .expect("metric can be created")
});

pub static VAULT_MANAGER_REVENUE: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new(
        "lynx_vault_manager_revenue_wei",
        "Manager revenue not yet withdrawn",
    )
    .expect("metric can be created")
});

pub static VAULT_MANAGER_WITHDRAWALS: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "lynx_vault_manager_withdrawals_total",
        "Manager revenue withdrawals",
    )
    .expect("metric can be created")
});

/// Register all vault metrics with the given registry.
pub fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(VAULT_TOTAL_SHARES.clone()))
        .ok();
    registry.register(Box::new(VAULT_MEMBERS.clone())).ok();
    registry
        .register(Box::new(VAULT_REWARDS_REALIZED.clone()))
        .ok();
    registry
        .register(Box::new(VAULT_REWARDS_CLAIMED.clone()))
        .ok();
    registry
        .register(Box::new(VAULT_MANAGER_REVENUE.clone()))
        .ok();
    registry
        .register(Box::new(VAULT_MANAGER_WITHDRAWALS.clone()))
        .ok();
}
