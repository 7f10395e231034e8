//! Layered runtime settings for services and tooling.
//!
//! Settings start from built-in defaults and are overridden by
//! `WORKBOARD_*` environment variables, for example
//! `WORKBOARD_DATABASE_URL` or `WORKBOARD_POOL_MAX_SIZE`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Prefix of environment variables read by [`ServiceSettings::from_env`].
pub const ENV_PREFIX: &str = "WORKBOARD";

const DEFAULT_POOL_MAX_SIZE: u32 = 4;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialised.
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    /// A value was read but is unusable.
    #[error("invalid setting {key}: {reason}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Runtime settings shared by the task and user services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceSettings {
    database_url: String,
    pool_max_size: u32,
    log_filter: String,
}

impl ServiceSettings {
    /// Returns a builder pre-populated with defaults for every optional key.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] if a default cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("pool_max_size", i64::from(DEFAULT_POOL_MAX_SIZE))?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?)
    }

    /// Loads settings from defaults and `WORKBOARD_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when `WORKBOARD_DATABASE_URL` is missing or
    /// any value is invalid.
    pub fn from_env() -> Result<Self, SettingsError> {
        let config = Self::defaults()?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Self::from_config(config)
    }

    /// Deserialises and validates settings from an assembled [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a key is missing or mistyped and
    /// [`SettingsError::Invalid`] when a value is out of range.
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.database_url.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "database_url",
                reason: "must not be empty",
            });
        }
        if self.pool_max_size == 0 {
            return Err(SettingsError::Invalid {
                key: "pool_max_size",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Returns the `PostgreSQL` connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}
