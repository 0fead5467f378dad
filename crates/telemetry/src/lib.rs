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

//! # Cryptonym Telemetry
//!
//! This crate provides the observability infrastructure for Cryptonym:
//! structured logging initialization and abstract sinks that decouple batch
//! instrumentation from the backend that records it.

/// The initialization routine for global structured logging.
pub mod init;
/// A metrics sink that records coalesced batch counters as log events.
pub mod log;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

// Re-export the public helper functions for easy access to the global sinks.
pub use sinks::{batch_metrics, error_metrics};
