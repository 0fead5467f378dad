// Path: crates/test_utils/src/lib.rs
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

//! # Cryptonym Test Utilities
//!
//! An in-memory chain connection and shared fixtures for testing the payload
//! pipeline and the batch supervisor without a node.

pub mod fixtures;
pub mod mock;
