//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relayed calls by method, status
//!   (methods outside the known set share the `other` label)
//! - `relay_request_duration_seconds` (histogram): end-to-end latency by method
//! - `relay_rejections_total` (counter): descriptors refused with 400, by reason
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::client::Method;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Bounded label for a caller-supplied method token.
pub fn method_label(token: &str) -> &'static str {
    Method::from_token(token).map(Method::as_str).unwrap_or("other")
}

/// Record one relayed call.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method_label(method);
    metrics::counter!(
        "relay_requests_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record a descriptor rejected before dispatch.
pub fn record_rejection(reason: &'static str) {
    metrics::counter!("relay_rejections_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rendered: &str, name: &str) -> Vec<String> {
        rendered
            .lines()
            .filter(|line| line.starts_with(&format!("{name}{{")))
            .map(|line| line.split_whitespace().next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_method_label_is_bounded() {
        assert_eq!(method_label("get"), "get");
        assert_eq!(method_label("delete"), "delete");
        assert_eq!(method_label("patch"), "other");
        assert_eq!(method_label("GET"), "other");
        assert_eq!(method_label(""), "other");
    }

    #[test]
    fn test_unknown_methods_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            for i in 0..50 {
                record_request(&format!("m{i}"), 500, Instant::now());
            }
            record_request("get", 200, Instant::now());
            record_request("get", 200, Instant::now());
        });

        let rendered = handle.render();
        let requests = series(&rendered, "relay_requests_total");
        assert_eq!(requests.len(), 2, "unexpected series: {requests:?}");
        assert!(rendered.contains(r#"relay_requests_total{method="other",status="500"} 50"#));
        assert!(rendered.contains(r#"relay_requests_total{method="get",status="200"} 2"#));
        assert!(!rendered.contains("m0"));
    }
}
