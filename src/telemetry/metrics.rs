//! Prometheus metrics setup and metric definitions

use crate::store::AggregateKey;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, BuildError> {
    // Sub-millisecond buckets first: most operations never leave memory.
    let buckets = vec![
        0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)?
        .install_recorder()
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup (not just after first use).
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!("cms_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "cms_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "cms_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    // Access control metrics
    describe_counter!("cms_auth_login_total", "Total number of login attempts");
    describe_counter!(
        "cms_access_denied_total",
        "Operations rejected because the caller's level was too low"
    );

    // Store metrics
    describe_counter!(
        "cms_store_operations_total",
        "Aggregate store loads and saves by outcome"
    );

    counter!("cms_auth_login_total", "result" => "success").absolute(0);
    counter!("cms_auth_login_total", "result" => "failure").absolute(0);
    gauge!("cms_http_requests_in_flight").set(0.0);
}

/// Record a login attempt outcome
pub fn record_login(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("cms_auth_login_total", "result" => result).increment(1);
}

/// Record a rejected privileged operation
pub fn record_access_denied(operation: &'static str) {
    counter!("cms_access_denied_total", "operation" => operation).increment(1);
}

/// Record an aggregate store load/save
pub fn record_store_operation(key: AggregateKey, op: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    counter!(
        "cms_store_operations_total",
        "key" => key.as_str(),
        "op" => op,
        "result" => result
    )
    .increment(1);
}
