// src/health/mod.rs
mod postgres;
mod prober;
mod status;

pub use postgres::PostgresCheck;
pub use prober::{ConnectivityCheck, HealthProber, ProbeError};
pub use status::{ComponentStatus, HealthCheckResult};
