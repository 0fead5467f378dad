// Path: crates/crypto/src/sign/ecdsa/tests/mod.rs
use super::*;

const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

#[test]
fn test_keypair_generation() {
    let keypair = Secp256k1KeyPair::generate();
    let message = b"Test message";

    let signature = SigningKeyPair::sign(&keypair, message).unwrap();
    assert!(keypair.public_key().verify(message, &signature).is_ok());
    assert!(keypair.public_key().verify(b"other", &signature).is_err());
}

#[test]
fn test_serialization_roundtrip() {
    let keypair = Secp256k1KeyPair::from_seed_hex(SEED).unwrap();

    let public_bytes = keypair.public_key().to_bytes();
    let private_bytes = keypair.private_key().to_bytes();
    assert_eq!(public_bytes.len(), 33);
    assert_eq!(private_bytes.len(), 32);
    assert_eq!(hex::encode(&private_bytes), SEED);

    let public_key = Secp256k1PublicKey::from_bytes(&public_bytes).unwrap();
    let private_key = Secp256k1PrivateKey::from_bytes(&private_bytes).unwrap();
    assert_eq!(public_key, private_key.public_key());
}

#[test]
fn test_seed_hex_is_validated() {
    let a = Secp256k1KeyPair::from_seed_hex(SEED).unwrap();
    let b = Secp256k1KeyPair::from_seed_hex(SEED).unwrap();
    assert_eq!(a.public_key_string(), b.public_key_string());
    assert_eq!(a.derived_actor(), b.derived_actor());
    assert!(Secp256k1KeyPair::from_seed_hex("zz").is_err());
    assert!(Secp256k1KeyPair::from_seed_hex("1111").is_err());
    // Zero is not a valid secret scalar.
    assert!(Secp256k1KeyPair::from_seed_hex(&"00".repeat(32)).is_err());
}

#[test]
fn test_key_strings_parse_back() {
    let keypair = Secp256k1KeyPair::from_seed_hex(SEED).unwrap();
    let k1 = keypair.public_key_string();
    let legacy = keypair.legacy_public_key_string();
    assert!(k1.starts_with("PUB_K1_"));
    assert!(legacy.starts_with("FIO"));
    assert_eq!(Secp256k1PublicKey::from_key_string(&k1).unwrap(), keypair.public_key());
    assert_eq!(Secp256k1PublicKey::from_key_string(&legacy).unwrap(), keypair.public_key());
    assert_eq!(keypair.public_key().to_key_string(), k1);
    assert_eq!(keypair.public_key().to_legacy_string(), legacy);
}

#[test]
fn test_digest_signature_is_canonical_and_recoverable() {
    let keypair = Secp256k1KeyPair::generate();
    for i in 0..32u8 {
        let digest = sha256([i]);
        let sig = keypair.sign_digest(&digest).unwrap();
        assert!(sig.starts_with("SIG_K1_"));

        let parsed = Secp256k1Signature::from_sig_string(&sig).unwrap();
        let bytes = parsed.to_bytes();
        assert_eq!(bytes.len(), SIGNATURE_LEN);
        assert!((31..=34).contains(&bytes[0]), "header {}", bytes[0]);
        assert!(is_canonical(&bytes[1..]));
        assert_eq!(parsed.to_sig_string(), sig);

        let public = Secp256k1PublicKey::from_key_string(&DigestSigner::public_key_string(&keypair))
            .unwrap();
        assert!(public.verify_digest(&digest, &parsed).is_ok());
        assert_eq!(parsed.recover(&digest).unwrap(), public);
    }
}

#[test]
fn test_wrong_key_and_bad_digest_fail() {
    let keypair1 = Secp256k1KeyPair::generate();
    let keypair2 = Secp256k1KeyPair::generate();
    let digest = sha256(b"payload");
    let sig = Secp256k1Signature::from_sig_string(&keypair1.sign_digest(&digest).unwrap()).unwrap();
    assert!(keypair2.public_key().verify_digest(&digest, &sig).is_err());

    assert!(matches!(
        keypair1.sign_digest(b"short"),
        Err(CryptoError::InvalidHashLength { expected: 32, got: 5 })
    ));
}

#[test]
fn test_canonical_rule() {
    let mut rs = [0x11u8; 64];
    assert!(is_canonical(&rs));
    rs[0] = 0x80;
    assert!(!is_canonical(&rs));
    rs[0] = 0x00;
    rs[1] = 0x11;
    assert!(!is_canonical(&rs));
    rs[1] = 0x81;
    assert!(is_canonical(&rs));
    rs[32] = 0xff;
    assert!(!is_canonical(&rs));
    assert!(!is_canonical(&rs[..63]));
}

#[test]
fn test_malformed_signature_bytes() {
    assert!(Secp256k1Signature::from_bytes(&[0u8; 64]).is_err());
    let mut bytes = vec![0u8; SIGNATURE_LEN];
    bytes[0] = 27;
    assert!(matches!(
        Secp256k1Signature::from_bytes(&bytes),
        Err(CryptoError::InvalidSignature(_))
    ));
}
