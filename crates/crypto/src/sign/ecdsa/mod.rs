// Path: crates/crypto/src/sign/ecdsa/mod.rs
//! Implementation of secp256k1 ECDSA signing using k256
//!
//! Signatures are recoverable and canonical in the chain's sense: neither `r`
//! nor `s` may have its top bit set or carry a redundant leading zero byte.
//! A deterministic signature that fails the test is retried with fresh
//! randomness.

use crate::algorithms::hash::sha256;
use crate::error::CryptoError;
use crate::keys;
use cryptonym_api::crypto::{
    DigestSigner, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};
use k256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use k256::ecdsa::RecoveryId;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// Signing attempts before giving up on a canonical signature.
const CANONICAL_ATTEMPTS: usize = 64;
/// Added to the recovery id in the first signature byte: 27, plus 4 for a
/// compressed key.
const RECOVERY_OFFSET: u8 = 31;
/// Length of a recoverable signature: header byte, `r` and `s`.
pub const SIGNATURE_LEN: usize = 65;

/// secp256k1 key pair implementation
#[derive(Clone)]
pub struct Secp256k1KeyPair {
    secret_key: k256::ecdsa::SigningKey,
}

/// Recoverable secp256k1 signature implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secp256k1Signature {
    signature: k256::ecdsa::Signature,
    recovery_id: RecoveryId,
}

/// secp256k1 public key implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(k256::ecdsa::VerifyingKey);

/// secp256k1 private key implementation
#[derive(Clone)]
pub struct Secp256k1PrivateKey(k256::ecdsa::SigningKey);

fn digest32(digest: &[u8]) -> Result<(), CryptoError> {
    if digest.len() != 32 {
        return Err(CryptoError::InvalidHashLength {
            expected: 32,
            got: digest.len(),
        });
    }
    Ok(())
}

/// Whether a 64-byte `r || s` is accepted by the chain.
pub fn is_canonical(rs: &[u8]) -> bool {
    let half_ok = |half: &[u8]| match half {
        [first, second, ..] => first & 0x80 == 0 && !(*first == 0 && second & 0x80 == 0),
        _ => false,
    };
    match (rs.len(), rs.get(..32), rs.get(32..)) {
        (64, Some(r), Some(s)) => half_ok(r) && half_ok(s),
        _ => false,
    }
}

fn sign_prehash_canonical(
    key: &k256::ecdsa::SigningKey,
    digest: &[u8],
) -> Result<Secp256k1Signature, CryptoError> {
    digest32(digest)?;
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest)
        .map_err(|e| CryptoError::OperationFailed(e.to_string()))?;
    if is_canonical(&signature.to_bytes()) {
        return Ok(Secp256k1Signature {
            signature,
            recovery_id,
        });
    }
    let verifying_key = key.verifying_key();
    for _ in 0..CANONICAL_ATTEMPTS {
        let signature: k256::ecdsa::Signature = key
            .sign_prehash_with_rng(&mut OsRng, digest)
            .map_err(|e| CryptoError::OperationFailed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        if !is_canonical(&signature.to_bytes()) {
            continue;
        }
        let recovery_id = RecoveryId::trial_recovery_from_prehash(verifying_key, digest, &signature)
            .map_err(|e| CryptoError::OperationFailed(e.to_string()))?;
        return Ok(Secp256k1Signature {
            signature,
            recovery_id,
        });
    }
    Err(CryptoError::OperationFailed(format!(
        "no canonical signature after {CANONICAL_ATTEMPTS} attempts"
    )))
}

impl Secp256k1KeyPair {
    /// Generate a new secp256k1 key pair
    pub fn generate() -> Self {
        Self {
            secret_key: k256::ecdsa::SigningKey::random(&mut OsRng),
        }
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &Secp256k1PrivateKey) -> Self {
        Self {
            secret_key: private_key.0.clone(),
        }
    }

    /// Create from a 32-byte secret scalar given as hex
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            hex::decode(seed_hex.trim())
                .map_err(|e| CryptoError::InvalidKey(format!("seed is not hex: {e}")))?,
        );
        let private_key = Secp256k1PrivateKey::from_bytes(&bytes)?;
        Ok(Self::from_private_key(&private_key))
    }

    fn compressed(&self) -> Vec<u8> {
        self.secret_key.verifying_key().to_sec1_bytes().to_vec()
    }

    /// The `PUB_K1_` encoding of the public key
    pub fn public_key_string(&self) -> String {
        keys::k1_public_key_string(&self.compressed())
    }

    /// The legacy `FIO` encoding of the public key
    pub fn legacy_public_key_string(&self) -> String {
        keys::legacy_public_key_string(&self.compressed())
    }

    /// The account name derived from the public key
    pub fn derived_actor(&self) -> String {
        keys::actor_from_public_key(&self.compressed())
    }
}

impl SigningKeyPair for Secp256k1KeyPair {
    type PublicKey = Secp256k1PublicKey;
    type PrivateKey = Secp256k1PrivateKey;
    type Signature = Secp256k1Signature;

    fn public_key(&self) -> Self::PublicKey {
        Secp256k1PublicKey(self.secret_key.verifying_key().clone())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Secp256k1PrivateKey(self.secret_key.clone())
    }

    /// Signs the SHA-256 digest of `message`.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        sign_prehash_canonical(&self.secret_key, &sha256(message))
    }
}

impl DigestSigner for Secp256k1KeyPair {
    fn public_key_string(&self) -> String {
        Secp256k1KeyPair::public_key_string(self)
    }

    fn sign_digest(&self, digest: &[u8]) -> Result<String, CryptoError> {
        Ok(sign_prehash_canonical(&self.secret_key, digest)?.to_sig_string())
    }
}

impl Secp256k1PublicKey {
    /// Verifies `signature` over a precomputed 32-byte digest.
    pub fn verify_digest(
        &self,
        digest: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        digest32(digest)?;
        self.0
            .verify_prehash(digest, &signature.signature)
            .map_err(|_| CryptoError::VerificationFailed)
    }

    /// Parse a public key from its `PUB_K1_` or legacy encoding
    pub fn from_key_string(s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&keys::parse_k1_public_key(s)?)
    }

    /// The legacy `FIO` encoding of the key
    pub fn to_legacy_string(&self) -> String {
        keys::legacy_public_key_string(&self.to_bytes())
    }
}

impl VerifyingKey for Secp256k1PublicKey {
    type Signature = Secp256k1Signature;

    /// Verifies `signature` over the SHA-256 digest of `message`.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.verify_digest(&sha256(message), signature)
    }

    fn to_key_string(&self) -> String {
        keys::k1_public_key_string(&self.to_bytes())
    }
}

impl SerializableKey for Secp256k1PublicKey {
    /// The 33-byte compressed point.
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_sec1_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
            .map(Secp256k1PublicKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse public key: {e}")))
    }
}

impl SigningKey for Secp256k1PrivateKey {
    type Signature = Secp256k1Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        sign_prehash_canonical(&self.0, &sha256(message))
    }

    fn secret_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.to_bytes().to_vec())
    }
}

impl SerializableKey for Secp256k1PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidKey(
                "Invalid private key length: expected 32 bytes".to_string(),
            ));
        }
        k256::ecdsa::SigningKey::from_slice(bytes)
            .map(Secp256k1PrivateKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse private key: {e}")))
    }
}

impl Secp256k1PrivateKey {
    /// Get the public key corresponding to this private key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(self.0.verifying_key().clone())
    }
}

impl SerializableKey for Secp256k1Signature {
    /// The recovery header byte followed by `r` and `s`.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNATURE_LEN);
        out.push(self.recovery_id.to_byte() + RECOVERY_OFFSET);
        out.extend_from_slice(&self.signature.to_bytes());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let (header, rs) = match bytes {
            [header, rs @ ..] if bytes.len() == SIGNATURE_LEN => (*header, rs),
            _ => {
                return Err(CryptoError::InvalidSignature(format!(
                    "expected {SIGNATURE_LEN} bytes, got {}",
                    bytes.len()
                )))
            }
        };
        let recovery_id = header
            .checked_sub(RECOVERY_OFFSET)
            .and_then(RecoveryId::from_byte)
            .ok_or_else(|| CryptoError::InvalidSignature(format!("bad recovery header {header}")))?;
        let signature = k256::ecdsa::Signature::from_slice(rs)
            .map_err(|e| CryptoError::InvalidSignature(format!("Failed to parse signature: {e}")))?;
        Ok(Self {
            signature,
            recovery_id,
        })
    }
}

impl Signature for Secp256k1Signature {
    fn to_sig_string(&self) -> String {
        keys::k1_signature_string(&self.to_bytes())
    }
}

impl Secp256k1Signature {
    /// Parse a signature from its `SIG_K1_` encoding
    pub fn from_sig_string(s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&keys::parse_k1_signature(s)?)
    }

    /// Recovers the signing key from a precomputed digest.
    pub fn recover(&self, digest: &[u8]) -> Result<Secp256k1PublicKey, CryptoError> {
        digest32(digest)?;
        k256::ecdsa::VerifyingKey::recover_from_prehash(digest, &self.signature, self.recovery_id)
            .map(Secp256k1PublicKey)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests;
