// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Cryptonym Types
//!
//! This crate is the foundational library for Cryptonym, containing the data
//! model shared by every other crate in the workspace.
//!
//! ## Architectural Role
//!
//! As the base crate, `cryptonym-types` has minimal dependencies and is itself a
//! dependency for almost every other crate. It provides the canonical definitions
//! for field specifications, contract schemas, transactions, multisig envelopes,
//! submission outcomes, configuration, and the error enums used across the
//! resolution, encoding and submission pipeline.

/// The maximum size in bytes of an assembled action payload.
pub const MAX_PAYLOAD_BYTES: usize = 512 * 1024; // 512 KiB
/// Number of retained submission outcomes before the history is cleared.
pub const HISTORY_LIMIT: usize = 256;
/// Smallest units of FIO per whole token.
pub const SUF_PER_FIO: f64 = 1_000_000_000.0;

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::PackError> = std::result::Result<T, E>;

/// Contract schema (ABI) definitions and helpers for merging derived fragments.
pub mod abi;
/// Lookup sets for actions that need privileged or producer accounts.
pub mod catalog;
/// Transaction, action and permission structures.
pub mod chain;
/// Configuration structures for chain access, batch runs and action specs.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Field specifications, generation modes and resolved values.
pub mod field;
/// Multisig proposal and wrap-execute envelopes.
pub mod msig;
/// Submission outcomes and response summaries.
pub mod outcome;
