// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Implementation of Ed25519 signing using ed25519-dalek

use crate::error::CryptoError;
use crate::keys;
use cryptonym_api::crypto::{
    DigestSigner, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};
use ed25519_dalek::{Signer, Verifier};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// Ed25519 key pair implementation
#[derive(Clone)]
pub struct Ed25519KeyPair {
    /// Private signing key; the public key is derived from it.
    secret_key: ed25519_dalek::SigningKey,
}

/// Ed25519 signature implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519Signature(ed25519_dalek::Signature);

/// Ed25519 public key implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(ed25519_dalek::VerifyingKey);

/// Ed25519 private key implementation
#[derive(Clone)]
pub struct Ed25519PrivateKey(ed25519_dalek::SigningKey);

impl Ed25519KeyPair {
    /// Generate a new Ed25519 key pair
    pub fn generate() -> Self {
        let mut rng = OsRng;
        Self {
            secret_key: ed25519_dalek::SigningKey::generate(&mut rng),
        }
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &Ed25519PrivateKey) -> Self {
        Self {
            secret_key: private_key.0.clone(),
        }
    }

    /// Create from a 32-byte seed given as hex
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            hex::decode(seed_hex.trim())
                .map_err(|e| CryptoError::InvalidKey(format!("seed is not hex: {e}")))?,
        );
        let private_key = Ed25519PrivateKey::from_bytes(&bytes)?;
        Ok(Self::from_private_key(&private_key))
    }

    /// The chain encoding of the public key
    pub fn public_key_string(&self) -> String {
        keys::public_key_string(self.secret_key.verifying_key().as_bytes())
    }

    /// The account name derived from the public key
    pub fn derived_actor(&self) -> String {
        keys::actor_from_public_key(self.secret_key.verifying_key().as_bytes())
    }
}

impl SigningKeyPair for Ed25519KeyPair {
    type PublicKey = Ed25519PublicKey;
    type PrivateKey = Ed25519PrivateKey;
    type Signature = Ed25519Signature;

    fn public_key(&self) -> Self::PublicKey {
        Ed25519PublicKey(self.secret_key.verifying_key())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Ed25519PrivateKey(self.secret_key.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.secret_key.sign(message)))
    }
}

impl DigestSigner for Ed25519KeyPair {
    fn public_key_string(&self) -> String {
        Ed25519KeyPair::public_key_string(self)
    }

    fn sign_digest(&self, digest: &[u8]) -> Result<String, CryptoError> {
        if digest.len() != 32 {
            return Err(CryptoError::InvalidHashLength {
                expected: 32,
                got: digest.len(),
            });
        }
        let signature = SigningKeyPair::sign(self, digest)?;
        Ok(signature.to_sig_string())
    }
}

impl VerifyingKey for Ed25519PublicKey {
    type Signature = Ed25519Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::VerificationFailed)
    }

    fn to_key_string(&self) -> String {
        keys::public_key_string(self.0.as_bytes())
    }
}

impl SerializableKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("Invalid public key length".to_string()))?;
        ed25519_dalek::VerifyingKey::from_bytes(&arr)
            .map(Ed25519PublicKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse public key: {:?}", e)))
    }
}

impl SigningKey for Ed25519PrivateKey {
    type Signature = Ed25519Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.0.sign(message)))
    }

    fn secret_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.to_bytes().to_vec())
    }
}

impl SerializableKey for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        // Export just the seed (32 bytes)
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey("Invalid private key length: expected 32 bytes".to_string())
        })?;
        Ok(Ed25519PrivateKey(ed25519_dalek::SigningKey::from_bytes(
            &seed,
        )))
    }
}

impl SerializableKey for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        ed25519_dalek::Signature::from_slice(bytes)
            .map(Ed25519Signature)
            .map_err(|e| {
                CryptoError::InvalidSignature(format!("Failed to parse signature: {:?}", e))
            })
    }
}

impl Signature for Ed25519Signature {
    fn to_sig_string(&self) -> String {
        keys::signature_string(&self.0.to_bytes())
    }
}

impl Ed25519Signature {
    /// Parse a signature from its chain encoding
    pub fn from_sig_string(s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&keys::parse_signature(s)?)
    }
}

impl Ed25519PublicKey {
    /// Get the raw public key bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Parse a public key from its chain encoding
    pub fn from_key_string(s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&keys::parse_public_key(s)?)
    }
}

impl Ed25519PrivateKey {
    /// Get the public key corresponding to this private key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }
}

#[cfg(test)]
mod tests;
