//! Staking gateway metrics.

use once_cell::sync::Lazy;
use prometheus::{Counter, CounterVec, Gauge, Opts, Registry};

// Deposits
pub static STAKING_VALIDATORS_STAKED: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "lynx_staking_validators_staked_total",
        "Total validators registered through the gateway",
    )
    .expect("metric can be created")
});

pub static STAKING_DEPOSITS_FORWARDED: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "lynx_staking_deposits_forwarded_total",
        "Total deposits forwarded to the deposit contract",
    )
    .expect("metric can be created")
});

pub static STAKING_TIPS_COLLECTED: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new(
        "lynx_staking_tips_collected_wei",
        "Tips accumulated by the gateway",
    )
    .expect("metric can be created")
});

// Exits
pub static STAKING_VALIDATORS_EXITED: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "lynx_staking_validators_exited_total",
        "Total validators queued for exit",
    )
    .expect("metric can be created")
});

pub static STAKING_EXIT_QUEUE_LENGTH: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new(
        "lynx_staking_exit_queue_length",
        "Validators waiting in the exit queue",
    )
    .expect("metric can be created")
});

// Rejections
pub static STAKING_REQUESTS_REJECTED: Lazy<CounterVec> = Lazy::new(|| {
    CounterVec::new(
        Opts::new(
            "lynx_staking_requests_rejected_total",
            "Stake requests rejected by reason",
        ),
        &["reason"],
    )
    .expect("metric can be created")
});

/// Register all staking metrics with the given registry.
pub fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(STAKING_VALIDATORS_STAKED.clone()))
        .ok();
    registry
        .register(Box::new(STAKING_DEPOSITS_FORWARDED.clone()))
        .ok();
    registry
        .register(Box::new(STAKING_TIPS_COLLECTED.clone()))
        .ok();
    registry
        .register(Box::new(STAKING_VALIDATORS_EXITED.clone()))
        .ok();
    registry
        .register(Box::new(STAKING_EXIT_QUEUE_LENGTH.clone()))
        .ok();
    registry
        .register(Box::new(STAKING_REQUESTS_REJECTED.clone()))
        .ok();
}
