// Path: crates/crypto/src/sign/mod.rs
//! Signature algorithms.

pub mod ecdsa;
pub mod eddsa;
