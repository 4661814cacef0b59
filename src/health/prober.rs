// src/health/prober.rs
use crate::health::HealthCheckResult;
use crate::metrics::MetricsCollector;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("connection attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Connection(String),
}

/// A single connectivity check against a backing dependency.
///
/// Implementations attempt to reach the dependency once and report success
/// or failure; the prober enforces the timeout.
#[async_trait]
pub trait ConnectivityCheck: Send + Sync {
    async fn connect(&self) -> Result<(), ProbeError>;

    fn component(&self) -> &'static str;
}

pub struct HealthProber {
    check: Arc<dyn ConnectivityCheck>,
    timeout: Duration,
    metrics: Arc<MetricsCollector>,
}

impl HealthProber {
    pub fn new(
        check: Arc<dyn ConnectivityCheck>,
        timeout: Duration,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            check,
            timeout,
            metrics,
        }
    }

    /// Run one probe: attempt the connection, collapse any failure kind to
    /// "down", write the health gauge, and return the result.
    ///
    /// Errors never escape this call; the failure branch logs the message and
    /// the endpoint stays HTTP 200.
    pub async fn probe(&self) -> HealthCheckResult {
        let component = self.check.component();

        let outcome = match timeout(self.timeout, self.check.connect()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };

        let healthy = match outcome {
            Ok(()) => {
                debug!(component, "Connectivity probe succeeded");
                true
            }
            Err(e) => {
                error!(component, "Database connection failed: {}", e);
                false
            }
        };

        self.metrics.set_health(healthy);

        HealthCheckResult::new(component, healthy)
    }
}
