// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use cryptonym_types::error::{
    BatchError, ChainError, CryptoError, EncodeError, ErrorCode, PackError, PayloadError,
};
pub use cryptonym_types::Result;
