// Path: crates/telemetry/src/time.rs
use crate::sinks::MetricsSink;
use std::time::Instant;

/// What a [`Timer`] reports to when it is dropped.
#[derive(Debug, Clone, Copy)]
pub enum TimerTarget<'a> {
    /// A full scan.
    Scan,
    /// One gateway request, labeled by operation.
    Gateway(&'a str),
}

/// Records the elapsed time of a scope when dropped.
pub struct Timer<'a> {
    sink: &'a dyn MetricsSink,
    target: TimerTarget<'a>,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn MetricsSink, target: TimerTarget<'a>) -> Self {
        Self {
            sink,
            target,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        let secs = self.start.elapsed().as_secs_f64();
        match self.target {
            TimerTarget::Scan => self.sink.observe_scan_duration(secs),
            TimerTarget::Gateway(operation) => self.sink.observe_request_duration(operation, secs),
        }
    }
}
