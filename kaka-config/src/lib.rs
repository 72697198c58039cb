//! # kaka Configuration System
//!
//! Layered configuration for the cookie engine.
//!
//! ## Features
//! - **Unified Configuration**: one `KakaConfig` shared by the library and CLI
//! - **Validation**: field ranges via `validator`, cross-field checks on load
//! - **Environment Awareness**: per-environment files and `KAKA_*` overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

mod error;
mod limits;
mod memory;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use limits::LimitsConfig;
pub use memory::{ArenaConfig, RenderConfig};
pub use telemetry::TelemetryConfig;

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq, Eq)]
pub struct KakaConfig {
    /// Header, name and value bounds.
    #[validate(nested)]
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Per-request arena sizing.
    #[validate(nested)]
    #[serde(default)]
    pub arena: ArenaConfig,

    /// Render buffer sizing.
    #[validate(nested)]
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging and metrics.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl KakaConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/kaka.yaml` - Base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - Environment-specific overrides (`KAKA_ENV`).
    /// 4. `KAKA_*` environment variables, `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(KakaConfig::default()));

        if Path::new("config/kaka.yaml").exists() {
            figment = figment.merge(Yaml::file("config/kaka.yaml"));
        } else {
            info!("config/kaka.yaml not found, using default configuration");
        }

        let env = std::env::var("KAKA_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            debug!("merging environment overrides from {env_file}");
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment.merge(Env::prefixed("KAKA_").split("__")))
    }

    /// Load configuration from a specific path, still honouring `KAKA_*` overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::extract(
            Figment::from(Serialized::defaults(KakaConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed("KAKA_").split("__")),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.check()?;
        Ok(config)
    }

    /// Runs field validation followed by the cross-field checks.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        validation::check_limits(&self.limits)
    }
}
