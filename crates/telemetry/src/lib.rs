// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # govscan Telemetry
//!
//! Structured logging initialization, a Prometheus metrics backend, and
//! abstract sinks that decouple instrumentation from that backend.

/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of metrics sinks using the `prometheus` crate.
pub mod prometheus;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

// Re-export the public helper function for easy access to the global sink.
pub use sinks::metrics;

#[cfg(test)]
mod tests {
    use super::sinks::{metrics, ErrorMetricsSink, GatewayMetricsSink, ScanMetricsSink};
    use super::time::{Timer, TimerTarget};

    #[test]
    fn test_nop_sink_is_default() {
        // Nothing installed in this test binary; calls must be harmless.
        let sink = metrics();
        sink.inc_proposals_visited(3);
        sink.inc_error("codec", "CODEC_TRUNCATED_INPUT");
        let _timer = Timer::new(sink, TimerTarget::Gateway("call-read"));
    }

    #[test]
    fn test_timer_reports_on_drop() {
        #[derive(Debug, Default)]
        struct Recording(std::sync::Mutex<Vec<f64>>);
        impl ScanMetricsSink for Recording {
            fn inc_proposals_visited(&self, _count: u64) {}
            fn inc_proposals_skipped(&self, _reason: &'static str) {}
            fn inc_stale_found(&self, _count: u64) {}
            fn observe_scan_duration(&self, duration_secs: f64) {
                self.0.lock().unwrap().push(duration_secs);
            }
        }
        impl GatewayMetricsSink for Recording {
            fn observe_request_duration(&self, _operation: &str, _duration_secs: f64) {}
            fn inc_requests_total(&self, _operation: &str, _outcome: &'static str) {}
            fn inc_retries(&self, _operation: &str) {}
        }
        impl ErrorMetricsSink for Recording {
            fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
        }

        let sink = Recording::default();
        {
            let _timer = Timer::new(&sink, TimerTarget::Scan);
        }
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }
}
