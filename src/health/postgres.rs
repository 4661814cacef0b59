// src/health/postgres.rs
use crate::config::Config;
use crate::health::{ConnectivityCheck, ProbeError};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

/// Probes the backing Postgres instance by opening a connection and
/// immediately closing it.
pub struct PostgresCheck {
    options: PgConnectOptions,
}

impl PostgresCheck {
    pub fn new(config: &Config) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .username(&config.postgres_user)
            .password(&config.postgres_password)
            .database(&config.postgres_db);

        Self { options }
    }

    #[cfg(test)]
    fn with_options(options: PgConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl ConnectivityCheck for PostgresCheck {
    async fn connect(&self) -> Result<(), ProbeError> {
        let conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| ProbeError::Connection(e.to_string()))?;

        conn.close()
            .await
            .map_err(|e| ProbeError::Connection(e.to_string()))?;

        Ok(())
    }

    fn component(&self) -> &'static str {
        "database"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_yields_connection_error() {
        // Nothing listens on port 1, so the attempt is refused immediately
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("appuser")
            .password("secret")
            .database("appdb");
        let check = PostgresCheck::with_options(options);

        let result = check.connect().await;

        assert!(matches!(result, Err(ProbeError::Connection(_))));
    }
}
