// src/health/status.rs
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

/// Outcome of a single health check, created fresh on every request.
#[derive(Debug, Serialize)]
pub struct HealthCheckResult {
    pub healthy: bool,
    pub checks: BTreeMap<&'static str, ComponentStatus>,
}

impl HealthCheckResult {
    pub fn new(component: &'static str, healthy: bool) -> Self {
        let status = if healthy {
            ComponentStatus::Up
        } else {
            ComponentStatus::Down
        };

        let mut checks = BTreeMap::new();
        checks.insert(component, status);

        Self { healthy, checks }
    }

    pub fn status(&self) -> &'static str {
        if self.healthy {
            "healthy"
        } else {
            "unhealthy"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ComponentStatus::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&ComponentStatus::Down).unwrap(),
            "\"down\""
        );
    }

    #[test]
    fn result_maps_component_to_status() {
        let result = HealthCheckResult::new("database", true);
        assert_eq!(result.status(), "healthy");
        assert_eq!(result.checks["database"], ComponentStatus::Up);

        let result = HealthCheckResult::new("database", false);
        assert_eq!(result.status(), "unhealthy");
        assert_eq!(result.checks["database"], ComponentStatus::Down);
    }
}
