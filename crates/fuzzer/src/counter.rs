// Path: crates/fuzzer/src/counter.rs
//! Process-lifetime monotonic counters.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Step applied to the float counter on each call.
pub const FLOAT_STEP: f64 = 1.00001;

/// A pair of monotonic counters.
///
/// The float counter is stored as a step count so concurrent callers never
/// lose an increment.
#[derive(Debug, Default)]
pub struct Counters {
    int: AtomicI64,
    float_steps: AtomicU64,
}

impl Counters {
    /// Creates counters starting at zero.
    pub const fn new() -> Self {
        Self {
            int: AtomicI64::new(0),
            float_steps: AtomicU64::new(0),
        }
    }

    /// Advances the integer counter by one and returns the new value.
    pub fn next_int(&self) -> i64 {
        self.int.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Advances the float counter by [`FLOAT_STEP`] and returns the new value.
    pub fn next_float(&self) -> f64 {
        let steps = self.float_steps.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        steps as f64 * FLOAT_STEP
    }

    /// Resets both counters to zero.
    pub fn reset(&self) {
        self.int.store(0, Ordering::SeqCst);
        self.float_steps.store(0, Ordering::SeqCst);
    }
}

static GLOBAL: Counters = Counters::new();

/// Advances the process-wide integer counter.
pub fn incrementing_int() -> i64 {
    GLOBAL.next_int()
}

/// Advances the process-wide float counter.
pub fn incrementing_float() -> f64 {
    GLOBAL.next_float()
}

/// Resets the process-wide counters.
pub fn reset_increment() {
    GLOBAL.reset()
}
