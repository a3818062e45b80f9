use std::time::Duration;

use crate::error::StartupError;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// Process configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub address: String,
    /// `ENV=DEV`: relaxes cross-origin restrictions.
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let database_url = get("DATABASE_URL").ok_or_else(|| {
            StartupError::Configuration(
                "DATABASE_URL environment variable is not set".to_string(),
            )
        })?;

        let address = get("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let dev_mode = get("ENV").as_deref() == Some("DEV");

        Ok(Self {
            database_url,
            address,
            dev_mode,
        })
    }
}

/// Startup connection policy: fixed number of attempts, fixed pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            interval: Duration::from_secs(2),
        }
    }
}
