use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("chat_gateway_requests_total", "Total number of chat requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "chat_gateway_rate_limited_total",
        "Chat requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES_TOTAL: Counter = register_counter!(
        "chat_gateway_upstream_failures_total",
        "Completions that failed upstream"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "chat_gateway_request_latency_seconds",
        "Upstream completion latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_CLIENTS: Gauge = register_gauge!(
        "chat_gateway_rate_limit_clients",
        "Current number of tracked rate-limit clients"
    )
    .unwrap();
}
