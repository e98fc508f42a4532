//! Generator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the batch generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// How long a single round may take before the request is aborted (seconds).
    #[serde(default = "default_round_timeout")]
    pub round_timeout_secs: u64,

    /// Maximum rounds per request.
    /// Each round only adds tickets, so this bounds requests whose draw ranges
    /// cannot produce enough distinct tickets.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
}

fn default_round_timeout() -> u64 {
    60
}

fn default_max_rounds() -> usize {
    10_000
}

impl GeneratorConfig {
    pub fn round_timeout(&self) -> Duration {
        Duration::from_secs(self.round_timeout_secs)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            round_timeout_secs: default_round_timeout(),
            max_rounds: default_max_rounds(),
        }
    }
}
