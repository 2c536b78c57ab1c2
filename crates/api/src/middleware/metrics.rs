//! Prometheus metrics: request middleware, domain counters and the
//! `/metrics` exporter.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Path label for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Middleware to record HTTP request metrics.
///
/// Records `http_requests_total` (method, path, status) and
/// `http_request_duration_seconds` (method, path). The path label is the
/// route template, e.g. `/api/admin/skills/:id`, so ids never become labels.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = method_to_str(req.method());
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method,
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}

/// Convert HTTP method to string for metric labels.
fn method_to_str(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

/// Record a login attempt outcome (`success`, `invalid_credentials`, `rate_limited`).
pub fn record_admin_login(outcome: &'static str) {
    counter!("admin_logins_total", "outcome" => outcome).increment(1);
}

/// Record an admin write against a content kind.
pub fn record_content_mutation(kind: &'static str, action: &'static str) {
    counter!(
        "content_mutations_total",
        "kind" => kind,
        "action" => action
    )
    .increment(1);
}

/// Handler for /metrics endpoint that returns Prometheus text format.
pub async fn metrics_handler() -> impl IntoResponse {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        let output = handle.render();
        (
            axum::http::StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            output,
        )
    } else {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            [(axum::http::header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized".to_string(),
        )
    }
}

use std::sync::OnceLock;

static PROMETHEUS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Error raised when the Prometheus recorder cannot be installed.
#[derive(Debug, thiserror::Error)]
pub enum MetricsInitError {
    #[error("Failed to build Prometheus recorder: {0}")]
    Build(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Prometheus handle already initialized")]
    AlreadyInitialized,
}

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once during application startup before any metrics are recorded.
pub fn init_metrics() -> Result<(), MetricsInitError> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsInitError::AlreadyInitialized);
    }

    // Set histogram buckets for request and query duration
    let handle = PrometheusBuilder::new()
        .set_buckets(&[
            0.001, 0.005, 0.01, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0,
        ])?
        .install_recorder()?;

    describe_counter!("http_requests_total", "HTTP requests by route and status");
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency by route"
    );
    describe_histogram!(
        "database_query_duration_seconds",
        Unit::Seconds,
        "Repository query latency"
    );
    describe_counter!("admin_logins_total", "Admin login attempts by outcome");
    describe_counter!("content_mutations_total", "Admin content writes by kind");

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsInitError::AlreadyInitialized)
}
