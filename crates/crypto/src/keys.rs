// Path: crates/crypto/src/keys.rs
//! String encodings for keys, signatures and key-derived account names.
//!
//! Keys and signatures are rendered as `PREFIX` followed by base58 of the raw
//! bytes with a four-byte checksum appended. secp256k1 values use the chain's
//! RIPEMD-160 checksum: over the bytes plus a `K1` suffix for `PUB_K1_` and
//! `SIG_K1_`, and over the bare key for the legacy `FIO` form. Ed25519 values
//! use a SHA-256 checksum.

use crate::algorithms::hash::sha256;
use crate::error::CryptoError;
use ripemd::{Digest, Ripemd160};

/// Prefix of an Ed25519 public key string.
pub const PUBLIC_KEY_PREFIX: &str = "PUB_ED_";
/// Prefix of an Ed25519 signature string.
pub const SIGNATURE_PREFIX: &str = "SIG_ED_";
/// Prefix of a secp256k1 public key string.
pub const K1_PUBLIC_KEY_PREFIX: &str = "PUB_K1_";
/// Prefix of a secp256k1 signature string.
pub const K1_SIGNATURE_PREFIX: &str = "SIG_K1_";
/// Prefix of a legacy secp256k1 public key string.
pub const LEGACY_KEY_PREFIX: &str = "FIO";
/// Characters allowed in an account name.
pub const NAME_ALPHABET: &[u8] = b"12345abcdefghijklmnopqrstuvwxyz";
/// Length of a key-derived account name.
pub const ACTOR_LEN: usize = 12;

const CHECKSUM_LEN: usize = 4;
const K1_SUFFIX: &[u8] = b"K1";

type Checksum = [u8; CHECKSUM_LEN];

fn truncate(digest: &[u8]) -> Checksum {
    let mut out = [0u8; CHECKSUM_LEN];
    for (o, d) in out.iter_mut().zip(digest) {
        *o = *d;
    }
    out
}

fn sha256_checksum(bytes: &[u8]) -> Checksum {
    truncate(&sha256(bytes))
}

fn ripemd_checksum(bytes: &[u8]) -> Checksum {
    truncate(&Ripemd160::digest(bytes))
}

fn k1_checksum(bytes: &[u8]) -> Checksum {
    let mut hasher = Ripemd160::new();
    hasher.update(bytes);
    hasher.update(K1_SUFFIX);
    truncate(&hasher.finalize())
}

fn encode(prefix: &str, bytes: &[u8], checksum: fn(&[u8]) -> Checksum) -> String {
    let mut payload = bytes.to_vec();
    payload.extend(checksum(bytes));
    format!("{prefix}{}", bs58::encode(payload).into_string())
}

fn decode(prefix: &str, s: &str, checksum: fn(&[u8]) -> Checksum) -> Result<Vec<u8>, CryptoError> {
    let body = s
        .strip_prefix(prefix)
        .ok_or_else(|| CryptoError::InvalidKey(format!("expected prefix {prefix}")))?;
    let mut raw = bs58::decode(body)
        .into_vec()
        .map_err(|e| CryptoError::InvalidKey(format!("invalid base58: {e}")))?;
    if raw.len() < CHECKSUM_LEN {
        return Err(CryptoError::InvalidKey("encoded value too short".into()));
    }
    let tail = raw.split_off(raw.len() - CHECKSUM_LEN);
    if checksum(&raw).as_slice() != tail.as_slice() {
        return Err(CryptoError::InvalidKey("checksum mismatch".into()));
    }
    Ok(raw)
}

fn as_signature_error(e: CryptoError) -> CryptoError {
    match e {
        CryptoError::InvalidKey(m) => CryptoError::InvalidSignature(m),
        other => other,
    }
}

/// Renders a raw 32-byte Ed25519 public key.
pub fn public_key_string(public_key: &[u8]) -> String {
    encode(PUBLIC_KEY_PREFIX, public_key, sha256_checksum)
}

/// Parses an Ed25519 public key string into raw bytes.
pub fn parse_public_key(s: &str) -> Result<Vec<u8>, CryptoError> {
    decode(PUBLIC_KEY_PREFIX, s, sha256_checksum)
}

/// Renders a raw 64-byte Ed25519 signature.
pub fn signature_string(signature: &[u8]) -> String {
    encode(SIGNATURE_PREFIX, signature, sha256_checksum)
}

/// Parses an Ed25519 signature string into raw bytes.
pub fn parse_signature(s: &str) -> Result<Vec<u8>, CryptoError> {
    decode(SIGNATURE_PREFIX, s, sha256_checksum).map_err(as_signature_error)
}

/// Renders a 33-byte compressed secp256k1 public key as `PUB_K1_...`.
pub fn k1_public_key_string(public_key: &[u8]) -> String {
    encode(K1_PUBLIC_KEY_PREFIX, public_key, k1_checksum)
}

/// Renders a 33-byte compressed secp256k1 public key as `FIO...`.
pub fn legacy_public_key_string(public_key: &[u8]) -> String {
    encode(LEGACY_KEY_PREFIX, public_key, ripemd_checksum)
}

/// Parses a secp256k1 public key in either the `PUB_K1_` or the legacy form.
pub fn parse_k1_public_key(s: &str) -> Result<Vec<u8>, CryptoError> {
    if s.starts_with(K1_PUBLIC_KEY_PREFIX) {
        decode(K1_PUBLIC_KEY_PREFIX, s, k1_checksum)
    } else {
        decode(LEGACY_KEY_PREFIX, s, ripemd_checksum)
    }
}

/// Renders a 65-byte recoverable secp256k1 signature as `SIG_K1_...`.
pub fn k1_signature_string(signature: &[u8]) -> String {
    encode(K1_SIGNATURE_PREFIX, signature, k1_checksum)
}

/// Parses a `SIG_K1_` signature string into its 65 raw bytes.
pub fn parse_k1_signature(s: &str) -> Result<Vec<u8>, CryptoError> {
    decode(K1_SIGNATURE_PREFIX, s, k1_checksum).map_err(as_signature_error)
}

/// Derives the 12-character account name owned by a public key.
pub fn actor_from_public_key(public_key: &[u8]) -> String {
    sha256(public_key)
        .iter()
        .take(ACTOR_LEN)
        .map(|b| {
            let idx = usize::from(*b) % NAME_ALPHABET.len();
            NAME_ALPHABET.get(idx).copied().map(char::from).unwrap_or('a')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_round_trip_and_checksum() {
        let key = [7u8; 32];
        let s = public_key_string(&key);
        assert!(s.starts_with("PUB_ED_"));
        assert_eq!(parse_public_key(&s).unwrap(), key.to_vec());

        let mut tampered = s.clone();
        tampered.push('1');
        assert!(parse_public_key(&tampered).is_err());
        assert!(parse_public_key("SIG_ED_abc").is_err());
    }

    #[test]
    fn signature_errors_are_signature_errors() {
        assert!(matches!(
            parse_signature("PUB_ED_x"),
            Err(CryptoError::InvalidSignature(_))
        ));
        assert!(matches!(
            parse_k1_signature("SIG_ED_x"),
            Err(CryptoError::InvalidSignature(_))
        ));
    }

    #[test]
    fn k1_checksum_covers_the_suffix() {
        let key = [2u8; 33];
        let k1 = k1_public_key_string(&key);
        let legacy = legacy_public_key_string(&key);
        assert!(k1.starts_with("PUB_K1_"));
        assert!(legacy.starts_with("FIO"));
        assert_eq!(parse_k1_public_key(&k1).unwrap(), key.to_vec());
        assert_eq!(parse_k1_public_key(&legacy).unwrap(), key.to_vec());

        // Same bytes, different checksum: the bodies are not interchangeable.
        let swapped = format!("FIO{}", k1.trim_start_matches("PUB_K1_"));
        assert!(matches!(
            parse_k1_public_key(&swapped),
            Err(CryptoError::InvalidKey(ref m)) if m == "checksum mismatch"
        ));
    }

    #[test]
    fn known_legacy_key_parses() {
        // The well-known development key of EOSIO-derived chains.
        let eos = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
        let body = eos.trim_start_matches("EOS");
        let raw = parse_k1_public_key(&format!("FIO{body}")).unwrap();
        assert_eq!(raw.len(), 33);
        assert_eq!(legacy_public_key_string(&raw), format!("FIO{body}"));
    }

    #[test]
    fn actor_is_deterministic_and_valid() {
        let a = actor_from_public_key(&[1u8; 32]);
        assert_eq!(a.len(), ACTOR_LEN);
        assert_eq!(a, actor_from_public_key(&[1u8; 32]));
        assert_ne!(a, actor_from_public_key(&[2u8; 32]));
        assert!(a.bytes().all(|c| NAME_ALPHABET.contains(&c)));
    }
}
