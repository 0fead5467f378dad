// Path: crates/crypto/src/error.rs
//! Local error types for the `cryptonym-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use cryptonym_api::error::CryptoError;
