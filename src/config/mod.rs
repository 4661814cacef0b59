// src/config/mod.rs
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Fixed connection timeout for database probes.
const CONNECT_TIMEOUT_SECS: u64 = 3;

/// Database connection settings, populated once at startup from the
/// environment and injected into the prober.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_host")]
    pub db_host: String,

    #[serde(default = "default_postgres_user")]
    pub postgres_user: String,

    #[serde(default = "default_postgres_password")]
    pub postgres_password: String,

    #[serde(default = "default_postgres_db")]
    pub postgres_db: String,
}

fn default_db_host() -> String {
    "db".to_string()
}

fn default_postgres_user() -> String {
    "appuser".to_string()
}

fn default_postgres_password() -> String {
    "secret".to_string()
}

fn default_postgres_db() -> String {
    "appdb".to_string()
}

impl Config {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_host.is_empty() {
            bail!("DB_HOST must not be empty");
        }
        if self.postgres_user.is_empty() {
            bail!("POSTGRES_USER must not be empty");
        }
        if self.postgres_db.is_empty() {
            bail!("POSTGRES_DB must not be empty");
        }
        Ok(())
    }
}

/// Load configuration from environment variables (DB_HOST, POSTGRES_USER,
/// POSTGRES_PASSWORD, POSTGRES_DB), falling back to the documented defaults.
pub fn load_config() -> Result<Config> {
    let source = config::Config::builder()
        .add_source(config::Environment::default())
        .build()
        .context("Failed to read environment configuration")?;

    let config: Config = source
        .try_deserialize()
        .context("Failed to parse configuration")?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize_empty() -> Config {
        // No sources attached, so every field takes its serde default
        config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = deserialize_empty();

        assert_eq!(config.db_host, "db");
        assert_eq!(config.postgres_user, "appuser");
        assert_eq!(config.postgres_password, "secret");
        assert_eq!(config.postgres_db, "appdb");
    }

    #[test]
    fn connect_timeout_is_fixed_at_three_seconds() {
        let config = deserialize_empty();
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let mut config = deserialize_empty();
        config.postgres_db = String::new();

        assert!(config.validate().is_err());
    }
}
