//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Batch generation (rounds, accepted tickets, collisions, stalls)
//! - Ticket pool lifecycle (clears)
//! - Winning ticket draws

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Generation Metrics
// =============================================================================

/// Generation rounds run.
pub static GENERATION_ROUNDS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "powerball_generation_rounds_total",
        "Total concurrent generation rounds run",
    )
    .unwrap()
});

/// Tickets drawn by producers, by outcome.
pub static TICKETS_PRODUCED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "powerball_tickets_produced_total",
            "Total tickets drawn by producers",
        ),
        &["result"], // "accepted", "collision"
    )
    .unwrap()
});

/// Generation requests that stalled.
pub static GENERATION_STALLS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "powerball_generation_stalls_total",
        "Total generation requests aborted by a stall",
    )
    .unwrap()
});

/// Round duration in seconds.
pub static ROUND_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "powerball_round_duration_seconds",
            "Duration of a generation round",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]),
    )
    .unwrap()
});

// =============================================================================
// Pool Metrics
// =============================================================================

/// Current number of tickets in the pool.
pub static POOL_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("powerball_pool_size", "Number of tickets in the pool").unwrap()
});

/// Pool clears by reason.
pub static POOL_CLEARS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("powerball_pool_clears_total", "Total pool clears"),
        &["reason"], // "shrink", "user"
    )
    .unwrap()
});

// =============================================================================
// Winning Ticket Metrics
// =============================================================================

/// Winning tickets drawn.
pub static WINNING_DRAWS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "powerball_winning_draws_total",
        "Total winning tickets drawn",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Generation
        Box::new(GENERATION_ROUNDS.clone()),
        Box::new(TICKETS_PRODUCED.clone()),
        Box::new(GENERATION_STALLS.clone()),
        Box::new(ROUND_DURATION.clone()),
        // Pool
        Box::new(POOL_SIZE.clone()),
        Box::new(POOL_CLEARS.clone()),
        // Winning ticket
        Box::new(WINNING_DRAWS.clone()),
    ]
}
