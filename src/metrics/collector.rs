// src/metrics/collector.rs
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        buffer
    }
}

pub struct MetricsCollector {
    // Static application information
    pub app_info: IntGaugeVec,

    // Health of the API as determined by the database probe
    pub api_health: IntGauge,

    // Custom counter for the data endpoint
    pub api_data_requests: IntCounter,

    // Default request metrics for all routes
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let app_info = IntGaugeVec::new(
            Opts::new("app_info", "Application info"),
            &["version"],
        )?;
        registry.register(Box::new(app_info.clone()))?;

        let api_health = IntGauge::new(
            "api_health",
            "Health status of API (1=up, 0=down)",
        )?;
        registry.register(Box::new(api_health.clone()))?;

        let api_data_requests = IntCounter::new(
            "api_data_requests",
            "Number of requests to data endpoint",
        )?;
        registry.register(Box::new(api_data_requests.clone()))?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            app_info,
            api_health,
            api_data_requests,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Record the static version label, exposed as a constant-1 gauge.
    pub fn set_app_info(&self, version: &str) {
        self.app_info.with_label_values(&[version]).set(1);
    }

    /// Write the health gauge, unconditionally, for every probe outcome.
    pub fn set_health(&self, healthy: bool) {
        let value = if healthy { 1 } else { 0 };
        self.api_health.set(value);
    }

    pub fn record_data_request(&self) {
        self.api_data_requests.inc();
    }

    pub fn record_request(
        &self,
        method: &str,
        path: &str,
        status_code: u16,
        duration: std::time::Duration,
    ) {
        let status = status_code.to_string();
        self.http_requests_total
            .with_label_values(&[method, path, &status])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, path, &status])
            .observe(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn set_health_writes_gauge() {
        let registry = MetricsRegistry::new().unwrap();
        let collector = registry.collector();

        collector.set_health(true);
        assert_eq!(collector.api_health.get(), 1);

        collector.set_health(false);
        assert_eq!(collector.api_health.get(), 0);
    }

    #[test]
    fn data_requests_counter_increments() {
        let registry = MetricsRegistry::new().unwrap();
        let collector = registry.collector();

        collector.record_data_request();
        collector.record_data_request();

        assert_eq!(collector.api_data_requests.get(), 2);
    }

    #[test]
    fn gather_exposes_registered_metrics() {
        let registry = MetricsRegistry::new().unwrap();
        let collector = registry.collector();

        collector.set_app_info("1.0.0");
        collector.set_health(true);
        collector.record_request("GET", "/", 200, Duration::from_millis(5));

        let output = String::from_utf8(registry.gather()).unwrap();
        assert!(output.contains("api_health 1"));
        assert!(output.contains("app_info"));
        assert!(output.contains("http_requests_total"));
    }
}
