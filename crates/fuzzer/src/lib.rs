// Path: crates/fuzzer/src/lib.rs
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
//! # Cryptonym Fuzzer
//!
//! Pure generators for randomized, boundary and deliberately invalid action
//! field values.
//!
//! Generators never fail. When something goes wrong they degrade to an empty
//! or zero value and report through the process-wide diagnostics channel.

pub mod bytes;
pub mod counter;
pub mod digest;
pub mod fio;
pub mod identity;
pub mod numeric;
pub mod text;

pub(crate) fn warn(message: impl Into<String>) {
    let message = message.into();
    #[cfg(test)]
    WARNINGS.with(|w| w.borrow_mut().push(message.clone()));
    cryptonym_api::diagnostics::report("fuzzer", message);
}

#[cfg(test)]
thread_local! {
    static WARNINGS: std::cell::RefCell<Vec<String>> = const { std::cell::RefCell::new(Vec::new()) };
}

/// Drains the warnings reported on the current thread.
#[cfg(test)]
pub(crate) fn take_warnings() -> Vec<String> {
    WARNINGS.with(|w| std::mem::take(&mut *w.borrow_mut()))
}
