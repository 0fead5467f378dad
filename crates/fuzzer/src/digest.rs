// Path: crates/fuzzer/src/digest.rs
//! Checksums and signatures over operator-supplied text.

use cryptonym_api::crypto::DigestSigner;
use cryptonym_crypto::algorithms::hash::{sha256, sha256_hex};

/// Lowercase hex SHA-256 of `value`.
pub fn checksum_of(value: &str) -> String {
    if value.is_empty() {
        crate::warn("sending checksum256 of an empty string");
    }
    sha256_hex(value)
}

/// A signature over the SHA-256 digest of `value`, or an empty string if
/// signing fails.
pub fn signature_for(value: &str, key: &dyn DigestSigner) -> String {
    match key.sign_digest(&sha256(value)) {
        Ok(sig) => sig,
        Err(e) => {
            crate::warn(format!("couldn't sign value: {e}"));
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptonym_api::crypto::{Signature as _, SigningKeyPair};
    use cryptonym_crypto::sign::ecdsa::{Secp256k1KeyPair, Secp256k1Signature};

    #[test]
    fn checksum_matches_known_digest() {
        assert_eq!(
            checksum_of("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(checksum_of("").len(), 64);
    }

    #[test]
    fn signature_verifies_against_digest() {
        let key = Secp256k1KeyPair::generate();
        let sig = signature_for("hello", &key);
        let parsed = Secp256k1Signature::from_sig_string(&sig).unwrap();
        assert!(key.public_key().verify_digest(&sha256("hello"), &parsed).is_ok());
        assert_eq!(parsed.to_sig_string(), sig);
    }
}
