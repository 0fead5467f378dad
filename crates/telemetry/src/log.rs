// Path: crates/telemetry/src/log.rs
//! A sink that records batch metrics as `tracing` events.
//!
//! Attempt durations are folded into a running mean so that a busy run logs
//! once per tick rather than once per attempt.

use crate::sinks::{BatchMetricsSink, ErrorMetricsSink, SINK};
use std::sync::atomic::{AtomicU64, Ordering};

/// Logs counters under the `metrics` target.
#[derive(Debug, Default)]
pub struct LogSink {
    attempts: AtomicU64,
    total_micros: AtomicU64,
}

impl LogSink {
    /// Mean attempt duration in seconds over the sink's lifetime.
    pub fn mean_attempt_secs(&self) -> f64 {
        let n = self.attempts.load(Ordering::Relaxed);
        if n == 0 {
            return 0.0;
        }
        self.total_micros.load(Ordering::Relaxed) as f64 / n as f64 / 1_000_000.0
    }
}

impl BatchMetricsSink for LogSink {
    fn set_outcome_totals(&self, succeeded: u64, failed: u64) {
        tracing::info!(
            target: "metrics",
            succeeded,
            failed,
            mean_attempt_secs = self.mean_attempt_secs(),
            "batch totals"
        );
    }

    fn set_active_workers(&self, workers: usize) {
        tracing::debug!(target: "metrics", workers, "active workers");
    }

    fn observe_attempt_duration(&self, duration_secs: f64) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        self.total_micros
            .fetch_add((duration_secs * 1_000_000.0) as u64, Ordering::Relaxed);
    }
}

impl ErrorMetricsSink for LogSink {
    fn inc_error(&self, kind: &'static str, code: &'static str) {
        tracing::debug!(target: "metrics", kind, code, "error");
    }
}

static LOG_SINK: once_cell::sync::Lazy<LogSink> = once_cell::sync::Lazy::new(LogSink::default);

/// Installs the log sink as the global metrics sink. Only the first call wins.
pub fn install() -> bool {
    SINK.set(&*LOG_SINK).is_ok()
}
