//! Prometheus metrics for the interactive session.
//!
//! Menu command counts and the current recurrence limit live here; generation
//! and pool metrics come from `powerball_core::metrics`.

use once_cell::sync::Lazy;
use prometheus::{self, Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use powerball_core::Lottery;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Menu commands handled, by command name.
pub static COMMANDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("powerball_menu_commands_total", "Menu commands handled"),
        &["command"],
    )
    .unwrap()
});

/// Recurrence limit currently in effect.
pub static RECURRENCE_LIMIT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "powerball_recurrence_limit",
        "Recurrence limit currently in effect",
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(COMMANDS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(RECURRENCE_LIMIT.clone()))
        .unwrap();

    // Core metrics (generator, pool, winning ticket)
    for metric in powerball_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Update gauges from the current session state.
pub fn collect_dynamic_metrics(lottery: &Lottery) {
    RECURRENCE_LIMIT.set(i64::from(lottery.recurrence_limit().get()));
    powerball_core::metrics::POOL_SIZE.set(lottery.ticket_count() as i64);
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
