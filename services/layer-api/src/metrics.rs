//! Prometheus counters for the layer and proxy endpoints.

use std::time::Duration;

use metrics::{counter, histogram};

/// Outcome label for `/layers`.
pub fn record_layers_request(status: u16) {
    counter!("layers_requests_total", "status" => status.to_string()).increment(1);
}

/// One proxied WMS request. `request` is the WMS `REQUEST` value, if any.
pub fn record_proxy_request(request: Option<&str>, status: u16, elapsed: Duration) {
    let request = request.unwrap_or("unknown").to_string();
    counter!(
        "wms_proxy_requests_total",
        "request" => request.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("wms_proxy_duration_ms", "request" => request).record(elapsed.as_secs_f64() * 1000.0);
}

/// Proxied request that never got an upstream response.
pub fn record_proxy_failure() {
    counter!("wms_proxy_failures_total").increment(1);
}
