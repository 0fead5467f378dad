// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions using sha2

use sha2::{Digest, Sha256};

/// SHA-256 of `message` as a fixed-size array.
pub fn sha256(message: impl AsRef<[u8]>) -> [u8; 32] {
    Sha256::digest(message.as_ref()).into()
}

/// SHA-256 of the concatenation of `parts`.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for p in parts {
        hasher.update(p);
    }
    hasher.finalize().into()
}

/// Lowercase hex SHA-256 of `message`.
pub fn sha256_hex(message: impl AsRef<[u8]>) -> String {
    hex::encode(sha256(message))
}

#[cfg(test)]
mod tests;
