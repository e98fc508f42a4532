//! Concurrent batch generation of tickets into the pool.
//!
//! Each request runs in rounds: a round spawns one producer task per missing
//! ticket, waits for all of them, and the next round is sized to whatever
//! shortfall collisions left behind.

mod batch;
mod config;
mod types;

pub use batch::{BatchGenerator, MAX_TARGET};
pub use config::GeneratorConfig;
pub use types::GenerationReport;
