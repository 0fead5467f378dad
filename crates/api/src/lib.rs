// Path: crates/api/src/lib.rs

//! # Cryptonym API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Cryptonym API
//!
//! Core traits and interfaces for Cryptonym. This crate defines the contract
//! between the payload pipeline and the components it depends on: schema
//! lookup, action encoding, signing, submission and chain queries.

/// Collaborator traits for schema lookup, encoding, signing and submission.
pub mod chain;
/// Defines unified traits for cryptographic primitives.
pub mod crypto;
/// A non-blocking diagnostics channel.
pub mod diagnostics;
/// Re-exports all core error types from the central `cryptonym-types` crate.
pub mod error;
/// The signer identity passed into payload resolution.
pub mod identity;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::chain::{
        ActionEncoder, ChainConnection, ChainQuery, ConnectionFactory, SchemaSource, Submitter,
        TransactionSigner,
    };
    pub use crate::crypto::{DigestSigner, SerializableKey, Signature, SigningKey, SigningKeyPair};
    pub use crate::diagnostics::Diagnostics;
    pub use crate::error::{
        BatchError, ChainError, CryptoError, EncodeError, ErrorCode, PackError, PayloadError,
    };
    pub use crate::identity::SignerIdentity;
}
