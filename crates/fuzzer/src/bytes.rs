// Path: crates/fuzzer/src/bytes.rs
//! Random byte buffers and their encodings.
//!
//! Buffers up to [`CRYPTO_RNG_LIMIT`] bytes come from the operating system's
//! cryptographic source. Larger buffers, which can run to megabytes, come from
//! a fast non-cryptographic generator seeded once per call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, RngCore, SeedableRng};

/// Largest buffer filled from the cryptographic source.
pub const CRYPTO_RNG_LIMIT: usize = 4096;
/// Upper bound (exclusive) of a random payload length.
pub const RANDOM_LENGTH_MAX: usize = i16::MAX as usize + 8;

/// How a random buffer is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteEncoding {
    /// Raw bytes.
    Raw,
    /// Lowercase hex, two characters per byte.
    Hex,
    /// Standard base64 with padding.
    Base64,
}

/// Exactly `size` random bytes.
pub fn random_bytes(size: usize) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    if size <= CRYPTO_RNG_LIMIT {
        if let Err(e) = OsRng.try_fill_bytes(&mut buf) {
            crate::warn(format!("could not read from the system random source: {e}"));
            return Vec::new();
        }
    } else {
        SmallRng::from_entropy().fill_bytes(&mut buf);
    }
    buf
}

/// `size` random bytes rendered as text in `encoding`.
///
/// Raw bytes are rendered lossily, since the result must be a string.
pub fn random_bytes_encoded(size: usize, encoding: ByteEncoding) -> String {
    let buf = random_bytes(size);
    match encoding {
        ByteEncoding::Raw => String::from_utf8_lossy(&buf).into_owned(),
        ByteEncoding::Hex => hex::encode(buf),
        ByteEncoding::Base64 => STANDARD.encode(buf),
    }
}

/// A random 32-byte checksum.
pub fn random_checksum() -> [u8; 32] {
    let mut cs = [0u8; 32];
    if let Err(e) = OsRng.try_fill_bytes(&mut cs) {
        crate::warn(format!("could not read from the system random source: {e}"));
    }
    cs
}

/// A random payload length in `0..RANDOM_LENGTH_MAX`.
pub fn random_length() -> usize {
    rand::thread_rng().gen_range(0..RANDOM_LENGTH_MAX)
}
