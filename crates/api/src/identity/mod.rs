// Path: crates/api/src/identity/mod.rs
//! The signer identity passed into payload resolution.

use crate::crypto::DigestSigner;
use std::fmt;
use std::sync::Arc;

/// An actor together with the key that signs for it.
#[derive(Clone)]
pub struct SignerIdentity {
    /// The signing account.
    pub actor: String,
    /// The public key, in the chain's string encoding.
    pub public_key: String,
    /// The key material.
    pub signer: Arc<dyn DigestSigner>,
}

impl SignerIdentity {
    /// Builds an identity, taking the public key from the signer.
    pub fn new(actor: impl Into<String>, signer: Arc<dyn DigestSigner>) -> Self {
        Self {
            actor: actor.into(),
            public_key: signer.public_key_string(),
            signer,
        }
    }
}

impl fmt::Debug for SignerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerIdentity")
            .field("actor", &self.actor)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
