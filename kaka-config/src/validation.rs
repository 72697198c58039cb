//! Custom validation functions for configuration.

use validator::ValidationError;

use crate::limits::LimitsConfig;
use crate::ConfigError;

/// Validate a `tracing` level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid =
        ["trace", "debug", "info", "warn", "error"].contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// A single name or value can never be longer than the header that carries it.
pub fn check_limits(limits: &LimitsConfig) -> Result<(), ConfigError> {
    if limits.max_name_len > limits.max_header_len {
        return Err(ConfigError::Inconsistent(format!(
            "max_name_len ({}) exceeds max_header_len ({})",
            limits.max_name_len, limits.max_header_len
        )));
    }
    if limits.max_value_len > limits.max_header_len {
        return Err(ConfigError::Inconsistent(format!(
            "max_value_len ({}) exceeds max_header_len ({})",
            limits.max_value_len, limits.max_header_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("WARN").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }

    #[test]
    fn name_bound_above_header_bound_is_rejected() {
        let limits = LimitsConfig {
            max_header_len: 64,
            max_name_len: 128,
            max_value_len: 32,
        };
        assert!(matches!(
            check_limits(&limits),
            Err(ConfigError::Inconsistent(_))
        ));
    }
}
