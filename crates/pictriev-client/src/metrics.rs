//! Request metrics.
//!
//! Recorded through the `metrics` facade; nothing is emitted unless the
//! embedding application installs a recorder.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total requests by command and outcome.
    pub const REQUESTS_TOTAL: &str = "pictriev_requests_total";

    /// Request latency in seconds by command.
    pub const LATENCY_SECONDS: &str = "pictriev_latency_seconds";
}

/// Outcome label for successful requests.
pub const OUTCOME_OK: &str = "ok";

/// Record metrics for a completed request.
pub fn record_request(command: &str, outcome: &'static str, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "command" => command.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "command" => command.to_string()
    )
    .record(latency_ms / 1000.0);
}
