//! Lynx Prometheus metrics infrastructure.
//!
//! This crate provides centralized metric definitions for the staking
//! gateway and the rewards vault. Metrics are organized by contract.

pub mod staking;
pub mod vault;

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Global Prometheus registry for all Lynx metrics.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();

    // Register all metric collectors
    staking::register_metrics(&registry);
    vault::register_metrics(&registry);

    registry
});

/// Initialize all metrics. Call once at startup.
pub fn init() {
    Lazy::force(&REGISTRY);
    tracing::info!("Lynx metrics initialized");
}

/// Render every registered metric in the Prometheus text exposition format.
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
