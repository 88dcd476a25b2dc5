// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram, register_histogram_vec, register_int_counter,
    register_int_counter_vec, Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec,
    TextEncoder,
};

// --- Metric Statics ---
// Collectors are set exactly once by `install`.

static GATEWAY_REQUESTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static GATEWAY_RETRIES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static GATEWAY_REQUEST_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static SCAN_PROPOSALS_VISITED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static SCAN_PROPOSALS_SKIPPED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static SCAN_STALE_FOUND_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static SCAN_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// The Prometheus-backed sink. Only reachable through [`install`].
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` with the collector if `install` has set it.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl GatewayMetricsSink for PrometheusSink {
    fn observe_request_duration(&self, operation: &str, duration_secs: f64) {
        with_metric!(GATEWAY_REQUEST_DURATION_SECONDS, |m| m
            .with_label_values(&[operation])
            .observe(duration_secs));
    }
    fn inc_requests_total(&self, operation: &str, outcome: &'static str) {
        with_metric!(GATEWAY_REQUESTS_TOTAL, |m| m
            .with_label_values(&[operation, outcome])
            .inc());
    }
    fn inc_retries(&self, operation: &str) {
        with_metric!(GATEWAY_RETRIES_TOTAL, |m| m
            .with_label_values(&[operation])
            .inc());
    }
}

impl ScanMetricsSink for PrometheusSink {
    fn inc_proposals_visited(&self, count: u64) {
        with_metric!(SCAN_PROPOSALS_VISITED_TOTAL, |m| m.inc_by(count));
    }
    fn inc_proposals_skipped(&self, reason: &'static str) {
        with_metric!(SCAN_PROPOSALS_SKIPPED_TOTAL, |m| m
            .with_label_values(&[reason])
            .inc());
    }
    fn inc_stale_found(&self, count: u64) {
        with_metric!(SCAN_STALE_FOUND_TOTAL, |m| m.inc_by(count));
    }
    fn observe_scan_duration(&self, duration_secs: f64) {
        with_metric!(SCAN_DURATION_SECONDS, |m| m.observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, code: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, code]).inc());
    }
}

fn already_installed() -> prometheus::Error {
    prometheus::Error::Msg("prometheus sink already installed".into())
}

/// Registers all collectors, installs the sink globally and returns it.
/// Call once at startup; a second call fails.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    GATEWAY_REQUESTS_TOTAL
        .set(register_int_counter_vec!(
            "govscan_gateway_requests_total",
            "Total gateway requests, by operation and outcome.",
            &["operation", "outcome"]
        )?)
        .map_err(|_| already_installed())?;
    GATEWAY_RETRIES_TOTAL
        .set(register_int_counter_vec!(
            "govscan_gateway_retries_total",
            "Total retries of failed gateway requests.",
            &["operation"]
        )?)
        .map_err(|_| already_installed())?;
    GATEWAY_REQUEST_DURATION_SECONDS
        .set(register_histogram_vec!(
            "govscan_gateway_request_duration_seconds",
            "Latency of gateway requests.",
            &["operation"],
            exponential_buckets(0.005, 2.0, 12)?
        )?)
        .map_err(|_| already_installed())?;
    SCAN_PROPOSALS_VISITED_TOTAL
        .set(register_int_counter!(
            "govscan_scan_proposals_visited_total",
            "Total proposals fetched and evaluated by scans."
        )?)
        .map_err(|_| already_installed())?;
    SCAN_PROPOSALS_SKIPPED_TOTAL
        .set(register_int_counter_vec!(
            "govscan_scan_proposals_skipped_total",
            "Total proposal slots skipped by scans, by reason.",
            &["reason"]
        )?)
        .map_err(|_| already_installed())?;
    SCAN_STALE_FOUND_TOTAL
        .set(register_int_counter!(
            "govscan_scan_stale_found_total",
            "Total stale proposals reported by scans."
        )?)
        .map_err(|_| already_installed())?;
    SCAN_DURATION_SECONDS
        .set(register_histogram!(
            "govscan_scan_duration_seconds",
            "Wall-clock duration of a full stale-proposal scan.",
            exponential_buckets(0.05, 2.0, 12)?
        )?)
        .map_err(|_| already_installed())?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "govscan_errors_total",
            "Total number of errors, categorized by kind and code.",
            &["kind", "code"]
        )?)
        .map_err(|_| already_installed())?;

    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    SINK.set(&PROMETHEUS_SINK).map_err(|_| already_installed())?;
    Ok(&PROMETHEUS_SINK)
}

/// Renders every registered metric in the Prometheus text exposition format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
