use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::LotteryError;
use crate::generator::GeneratorConfig;
use crate::ticket::{DrawRanges, RecurrenceLimit};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub lottery: LotteryConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub draw: DrawRanges,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("powerball.db")
}

/// Lottery rules
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LotteryConfig {
    /// Recurrence limit used until one is saved (3, 4 or 5).
    #[serde(default = "default_recurrence_limit")]
    pub recurrence_limit: u8,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            recurrence_limit: default_recurrence_limit(),
        }
    }
}

fn default_recurrence_limit() -> u8 {
    RecurrenceLimit::MIN
}

impl LotteryConfig {
    /// The configured default limit.
    pub fn recurrence_limit(&self) -> Result<RecurrenceLimit, LotteryError> {
        RecurrenceLimit::new(self.recurrence_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.database.path.to_str().unwrap(), "powerball.db");
        assert_eq!(config.lottery.recurrence_limit, 3);
        assert_eq!(config.generator.max_rounds, 10_000);
        assert_eq!(config.draw, DrawRanges::default());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[database]
path = "/data/lotto.sqlite"

[lottery]
recurrence_limit = 4

[generator]
round_timeout_secs = 5
max_rounds = 100

[draw]
primary_min = 1
primary_max = 30
secondary_min = 1
secondary_max = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database.path.to_str().unwrap(), "/data/lotto.sqlite");
        assert_eq!(config.lottery.recurrence_limit().unwrap().get(), 4);
        assert_eq!(config.generator.round_timeout_secs, 5);
        assert_eq!(config.generator.max_rounds, 100);
        assert_eq!(config.draw.primary_max, 30);
        assert_eq!(config.draw.secondary_max, 10);
    }

    #[test]
    fn test_partial_draw_section_keeps_defaults() {
        let toml = r#"
[draw]
primary_max = 40
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.draw.primary_min, 1);
        assert_eq!(config.draw.primary_max, 40);
        assert_eq!(config.draw.secondary_max, 26);
    }

    #[test]
    fn test_out_of_domain_limit_parses_but_is_rejected() {
        let toml = r#"
[lottery]
recurrence_limit = 7
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.lottery.recurrence_limit().is_err());
    }
}
