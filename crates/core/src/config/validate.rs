use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Recurrence limit is 3, 4 or 5
/// - Generator round timeout and round budget are not 0
/// - Draw ranges fit the standard ranges and hold a full ticket
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config
        .lottery
        .recurrence_limit()
        .map_err(|e| ConfigError::ValidationError(format!("lottery.recurrence_limit: {}", e)))?;

    // Generator validation
    if config.generator.round_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "generator.round_timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.generator.max_rounds == 0 {
        return Err(ConfigError::ValidationError(
            "generator.max_rounds cannot be 0".to_string(),
        ));
    }

    config
        .draw
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("draw: {}", e)))?;

    Ok(())
}
