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

/// Returns a static reference to the configured batch metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn batch_metrics() -> &'static dyn BatchMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to batch submission runs.
pub trait BatchMetricsSink: Send + Sync + std::fmt::Debug {
    /// Sets the running totals of succeeded and failed attempts.
    fn set_outcome_totals(&self, succeeded: u64, failed: u64);
    /// Sets the gauge for the number of workers still running.
    fn set_active_workers(&self, workers: usize);
    /// Observes the duration of a single attempt.
    fn observe_attempt_duration(&self, duration_secs: f64);
}
impl BatchMetricsSink for NopSink {
    fn set_outcome_totals(&self, _succeeded: u64, _failed: u64) {}
    fn set_active_workers(&self, _workers: usize) {}
    fn observe_attempt_duration(&self, _duration_secs: f64) {}
}

/// A sink for categorized error counters.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter for an error of `kind`, labelled by its stable code.
    fn inc_error(&self, kind: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
}

/// A unified trait for a type that can act as a sink for all metric categories.
pub trait MetricsSink: BatchMetricsSink + ErrorMetricsSink {}
impl<T: BatchMetricsSink + ErrorMetricsSink> MetricsSink for T {}
