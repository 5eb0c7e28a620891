//! Ledger configuration
//!
//! Priority: environment variables > TOML file > defaults.

use crate::{ConfigError, MIN_ORGANIZATIONS};
use bulletproofs_core::{
    utils::is_power_of_two, BulletproofsResult, ParameterSet, DEFAULT_VECTOR_LENGTH,
};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use range::MAX_BIT_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/zkledger.toml";

/// Prefix of the environment variables overriding the file.
pub const ENV_PREFIX: &str = "ZKLEDGER_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Range proof width `V`; values are proven in `[0, 2^V)`.
    pub vector_length: usize,
    /// Number of organization slots per row.
    pub organizations: usize,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            vector_length: DEFAULT_VECTOR_LENGTH,
            organizations: 2,
            log_filter: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from [`DEFAULT_CONFIG_PATH`] and the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from a TOML file and the environment.
    ///
    /// A missing file is not an error; defaults fill every absent key.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Extract and validate a configuration from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_power_of_two(self.vector_length) || self.vector_length > MAX_BIT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "vector_length must be a power of two no larger than {}, got {}",
                MAX_BIT_LENGTH, self.vector_length
            )));
        }
        if self.organizations < MIN_ORGANIZATIONS {
            return Err(ConfigError::Invalid(format!(
                "a ledger needs at least {} organizations, got {}",
                MIN_ORGANIZATIONS, self.organizations
            )));
        }
        Ok(())
    }

    /// Derive the generator set for the configured width.
    pub fn parameters(&self) -> BulletproofsResult<ParameterSet> {
        ParameterSet::derive(self.vector_length)
    }
}
