//! Configuration for nullable column handling.
//!
//! This exposes [`NullableConfig`] so applications can load settings
//! from `config/nullable.toml` or environment variables using
//! `NullableConfig::load()`.

use crate::dialect::Dialect;
use crate::value::{BitStringPolicy, ScanOptions};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "config/nullable.toml";
const ENV_PREFIX: &str = "NULLABLE";

/// Settings for nullable column handling, read from the `nullable` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NullableConfig {
    /// Dialect used for bindings and generated DDL
    #[serde(default)]
    pub dialect: Dialect,
    /// Parse 64-byte driver text as a bit string
    #[serde(default = "default_bit_string_heuristic")]
    pub bit_string_heuristic: bool,
}

fn default_bit_string_heuristic() -> bool {
    true
}

impl Default for NullableConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            bit_string_heuristic: default_bit_string_heuristic(),
        }
    }
}

impl NullableConfig {
    /// Load the configuration from `config/nullable.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load the configuration from `path` (optional) overlaid with `NULLABLE__*` env vars.
    ///
    /// Settings live under a `nullable` table, e.g. `NULLABLE__NULLABLE__DIALECT=mysql`
    /// or, in TOML:
    ///
    /// ```toml
    /// [nullable]
    /// dialect = "mysql"
    /// bit_string_heuristic = false
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // File present but unreadable: warn and retry with env only
                if path.exists() {
                    log::warn!(
                        "failed to load {}, falling back to env: {}",
                        path.display(),
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        match settings.get::<NullableConfig>("nullable") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => {
                log::debug!("no nullable configuration found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Message(format!(
                "Nullable configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }

    /// Scan options implied by this configuration
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            bit_strings: if self.bit_string_heuristic {
                BitStringPolicy::LengthHeuristic
            } else {
                BitStringPolicy::DecimalOnly
            },
        }
    }
}
