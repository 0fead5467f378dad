// Path: crates/telemetry/src/time.rs
use crate::sinks::BatchMetricsSink;
use std::time::Instant;

/// Reports the time from construction to drop as an attempt duration.
pub struct Timer<'a> {
    sink: &'a dyn BatchMetricsSink,
    start: Instant,
}

impl<'a> Timer<'a> {
    /// Starts timing against `sink`.
    pub fn new(sink: &'a dyn BatchMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_attempt_duration(self.start.elapsed().as_secs_f64());
    }
}
