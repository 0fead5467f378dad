// Path: crates/fuzzer/src/identity.rs
//! Fresh random actors and public keys.

use cryptonym_crypto::sign::ecdsa::Secp256k1KeyPair;

/// The account name of a freshly generated key.
pub fn random_actor() -> String {
    Secp256k1KeyPair::generate().derived_actor()
}

/// A freshly generated public key.
pub fn random_pub_key() -> String {
    Secp256k1KeyPair::generate().public_key_string()
}
