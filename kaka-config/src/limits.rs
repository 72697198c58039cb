//! Input bounds for cookie headers.
//!
//! These bound per-request memory deterministically: anything larger is
//! rejected before it reaches the arena.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Size limits applied while parsing and storing cookies.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Longest accepted raw `Cookie` header (bytes).
    #[validate(range(min = 1, max = 1048576))]
    #[serde(default = "default_max_header_len")]
    pub max_header_len: usize,

    /// Longest accepted cookie name (bytes).
    #[validate(range(min = 1, max = 65536))]
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Longest accepted cookie value (bytes).
    #[validate(range(min = 1, max = 1048576))]
    #[serde(default = "default_max_value_len")]
    pub max_value_len: usize,
}

fn default_max_header_len() -> usize {
    8192
}

fn default_max_name_len() -> usize {
    256
}

fn default_max_value_len() -> usize {
    4096
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_header_len: default_max_header_len(),
            max_name_len: default_max_name_len(),
            max_value_len: default_max_value_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_default_limits() {
        LimitsConfig::default()
            .validate()
            .expect("Default limits should be valid");
    }

    #[test]
    fn zero_header_bound_is_invalid() {
        let mut limits = LimitsConfig::default();
        limits.max_header_len = 0;
        assert!(limits.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let limits: LimitsConfig = serde_yaml::from_str("max_name_len: 64").unwrap();
        assert_eq!(limits.max_name_len, 64);
        assert_eq!(limits.max_header_len, 8192);
        assert_eq!(limits.max_value_len, 4096);
    }
}
