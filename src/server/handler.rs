// src/server/handler.rs
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Method, Request, Response, StatusCode};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::Service;
use tracing::{debug, info};
use uuid::Uuid;

use crate::health::HealthProber;
use crate::metrics::MetricsRegistry;

type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Upper bound on the simulated response time of `/api/data`, in seconds.
const DATA_LATENCY_MAX_SECS: f64 = 0.2;

#[derive(Clone)]
pub struct RequestHandler {
    prober: Arc<HealthProber>,
    metrics: Arc<MetricsRegistry>,
}

impl RequestHandler {
    pub fn new(prober: Arc<HealthProber>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { prober, metrics }
    }

    async fn route(&self, req: Request<Body>) -> Result<Response<Body>, HandlerError> {
        let request_id = Uuid::new_v4();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let start = Instant::now();

        debug!(%request_id, %method, %path, "Handling request");

        let response = match (req.method(), req.uri().path()) {
            (&Method::GET, "/") => self.home()?,
            (&Method::GET, "/api/data") => self.data().await?,
            (&Method::GET, "/api/health") => self.health().await?,
            (&Method::GET, "/metrics") => self.metrics_exposition()?,
            _ => not_found()?,
        };

        let status = response.status();
        self.metrics.collector().record_request(
            method.as_str(),
            &path,
            status.as_u16(),
            start.elapsed(),
        );

        info!(%request_id, %method, %path, status = status.as_u16(), "Request complete");

        Ok(response)
    }

    fn home(&self) -> Result<Response<Body>, HandlerError> {
        json_response(StatusCode::OK, json!({"message": "Hello from API"}))
    }

    async fn data(&self) -> Result<Response<Body>, HandlerError> {
        // Simulate variable response time
        let delay = rand::random::<f64>() * DATA_LATENCY_MAX_SECS;
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;

        self.metrics.collector().record_data_request();

        json_response(StatusCode::OK, json!({"data": "Sample data from API"}))
    }

    /// Health check endpoint. Always returns 200; the body carries the
    /// healthy/unhealthy verdict and the per-component statuses.
    async fn health(&self) -> Result<Response<Body>, HandlerError> {
        let result = self.prober.probe().await;

        json_response(
            StatusCode::OK,
            json!({
                "status": result.status(),
                "checks": result.checks,
            }),
        )
    }

    fn metrics_exposition(&self) -> Result<Response<Body>, HandlerError> {
        let body = self.metrics.gather();
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))?;
        Ok(response)
    }
}

fn json_response(
    status: StatusCode,
    body: serde_json::Value,
) -> Result<Response<Body>, HandlerError> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;
    Ok(response)
}

fn not_found() -> Result<Response<Body>, HandlerError> {
    json_response(StatusCode::NOT_FOUND, json!({"error": "Not Found"}))
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = HandlerError;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.clone();
        Box::pin(async move { handler.route(req).await })
    }
}
