// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns the installed sink, or a no-op sink if none has been installed.
pub fn metrics() -> &'static dyn MetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics about calls made to the contract node.
pub trait GatewayMetricsSink: Send + Sync + std::fmt::Debug {
    /// Observes the latency of one gateway request, labeled by operation.
    fn observe_request_duration(&self, operation: &str, duration_secs: f64);
    /// Counts a finished gateway request, labeled by operation and outcome.
    fn inc_requests_total(&self, operation: &str, outcome: &'static str);
    /// Counts a retry of a failed gateway request.
    fn inc_retries(&self, operation: &str);
}
impl GatewayMetricsSink for NopSink {
    fn observe_request_duration(&self, _operation: &str, _duration_secs: f64) {}
    fn inc_requests_total(&self, _operation: &str, _outcome: &'static str) {}
    fn inc_retries(&self, _operation: &str) {}
}

/// A sink for metrics about stale-proposal scans.
pub trait ScanMetricsSink: Send + Sync + std::fmt::Debug {
    /// Counts proposals fetched and evaluated.
    fn inc_proposals_visited(&self, count: u64);
    /// Counts proposals skipped, labeled by reason (`absent`, `decode`).
    fn inc_proposals_skipped(&self, reason: &'static str);
    /// Counts stale proposals found.
    fn inc_stale_found(&self, count: u64);
    /// Observes the wall-clock duration of a full scan.
    fn observe_scan_duration(&self, duration_secs: f64);
}
impl ScanMetricsSink for NopSink {
    fn inc_proposals_visited(&self, _count: u64) {}
    fn inc_proposals_skipped(&self, _reason: &'static str) {}
    fn inc_stale_found(&self, _count: u64) {}
    fn observe_scan_duration(&self, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and code.
    fn inc_error(&self, kind: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: GatewayMetricsSink + ScanMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: GatewayMetricsSink + ScanMetricsSink + ErrorMetricsSink {}
