// Path: crates/api/src/crypto/mod.rs
//! Defines unified traits for cryptographic primitives.

use crate::error::CryptoError;
use zeroize::Zeroizing;

/// A trait for any key that can be serialized to and from bytes.
pub trait SerializableKey {
    /// Converts the key to a byte vector.
    fn to_bytes(&self) -> Vec<u8>;

    /// Creates a key from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// A trait for a key pair used in a signature algorithm.
pub trait SigningKeyPair {
    /// The public key type used for verification.
    type PublicKey: VerifyingKey<Signature = Self::Signature>;
    /// The private key type used for signing.
    type PrivateKey: SigningKey<Signature = Self::Signature>;
    /// The signature type produced.
    type Signature: Signature;

    /// Gets the public key.
    fn public_key(&self) -> Self::PublicKey;
    /// Gets the private key.
    fn private_key(&self) -> Self::PrivateKey;
    /// Signs a message with the private key.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
}

/// A trait for a public key used for signature verification.
pub trait VerifyingKey: SerializableKey {
    /// The signature type that this key can verify.
    type Signature: Signature;
    /// Verifies a signature against a message.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError>;
    /// The chain's string encoding of the key.
    fn to_key_string(&self) -> String;
}

/// A trait for a private key used for signing operations.
pub trait SigningKey: SerializableKey {
    /// The signature type that this key produces.
    type Signature: Signature;
    /// Signs a message.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
    /// The raw secret, wiped on drop.
    fn secret_bytes(&self) -> Zeroizing<Vec<u8>>;
}

/// A cryptographic signature.
pub trait Signature: SerializableKey {
    /// The chain's string encoding of the signature.
    fn to_sig_string(&self) -> String;
}

/// An object-safe signer over a precomputed digest.
///
/// This is what payload resolution and the local transaction signer hold, so
/// neither depends on a concrete key algorithm.
pub trait DigestSigner: Send + Sync {
    /// The chain's string encoding of the public key.
    fn public_key_string(&self) -> String;

    /// Signs a 32-byte digest and returns the chain's signature encoding.
    fn sign_digest(&self, digest: &[u8]) -> Result<String, CryptoError>;
}
