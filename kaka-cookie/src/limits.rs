use kaka_config::LimitsConfig;

/// Size bounds enforced by the parser and the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieLimits {
    pub max_header_len: usize,
    pub max_name_len: usize,
    pub max_value_len: usize,
}

impl Default for CookieLimits {
    fn default() -> Self {
        Self::from(&LimitsConfig::default())
    }
}

impl From<&LimitsConfig> for CookieLimits {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            max_header_len: config.max_header_len,
            max_name_len: config.max_name_len,
            max_value_len: config.max_value_len,
        }
    }
}
