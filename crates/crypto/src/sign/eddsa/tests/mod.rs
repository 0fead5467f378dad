// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;
use crate::algorithms::hash::sha256;

#[test]
fn test_keypair_generation() {
    let keypair = Ed25519KeyPair::generate();
    let message = b"Test message";

    // Sign
    let signature = SigningKeyPair::sign(&keypair, message).unwrap();

    // Verify
    let public_key = keypair.public_key();
    assert!(public_key.verify(message, &signature).is_ok());
}

#[test]
fn test_serialization_roundtrip() {
    let keypair = Ed25519KeyPair::generate();

    let public_bytes = keypair.public_key().to_bytes();
    let private_bytes = keypair.private_key().to_bytes();

    assert_eq!(public_bytes.len(), 32);
    assert_eq!(private_bytes.len(), 32); // Just the seed

    let public_key = Ed25519PublicKey::from_bytes(&public_bytes).unwrap();
    let private_key = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();

    // The loaded private key derives the same public key
    assert_eq!(public_key.to_bytes(), private_key.public_key().to_bytes());
}

#[test]
fn test_seed_hex_is_deterministic() {
    let seed = "11".repeat(32);
    let a = Ed25519KeyPair::from_seed_hex(&seed).unwrap();
    let b = Ed25519KeyPair::from_seed_hex(&seed).unwrap();
    assert_eq!(a.public_key_string(), b.public_key_string());
    assert_eq!(a.derived_actor(), b.derived_actor());
    assert!(Ed25519KeyPair::from_seed_hex("zz").is_err());
    assert!(Ed25519KeyPair::from_seed_hex("1111").is_err());
}

#[test]
fn test_wrong_signature_fails() {
    let keypair1 = Ed25519KeyPair::generate();
    let keypair2 = Ed25519KeyPair::generate();
    let message = b"Test message";

    let signature = SigningKeyPair::sign(&keypair1, message).unwrap();
    assert!(keypair2.public_key().verify(message, &signature).is_err());
}

#[test]
fn test_digest_signature_string_verifies() {
    let keypair = Ed25519KeyPair::generate();
    let digest = sha256(b"payload");
    let sig = keypair.sign_digest(&digest).unwrap();
    assert!(sig.starts_with("SIG_ED_"));

    let parsed = Ed25519Signature::from_sig_string(&sig).unwrap();
    let public = Ed25519PublicKey::from_key_string(&DigestSigner::public_key_string(&keypair))
        .unwrap();
    assert!(public.verify(&digest, &parsed).is_ok());

    assert!(matches!(
        keypair.sign_digest(b"short"),
        Err(CryptoError::InvalidHashLength { expected: 32, got: 5 })
    ));
}
