//! Prometheus metrics for tracker-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec,
    HistogramVec, TextEncoder,
};

/// HTTP request counter by method, path and status.
pub static HTTP_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tracker_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register http_requests_total")
});

/// HTTP request duration histogram by method and path.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "tracker_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register http_request_duration")
});

/// Transaction counter by kind.
pub static TRANSACTIONS_RECORDED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tracker_transactions_recorded_total",
        "Total number of transactions recorded",
        &["kind"] // sale, payment, return - not customer_id to avoid cardinality explosion
    )
    .expect("Failed to register transactions_recorded")
});

/// Customer creation counter.
pub static CUSTOMERS_CREATED: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "tracker_customers_created_total",
        "Total number of customers created"
    )
    .expect("Failed to register customers_created")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&HTTP_REQUEST_DURATION);
    Lazy::force(&TRANSACTIONS_RECORDED);
    Lazy::force(&CUSTOMERS_CREATED);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
