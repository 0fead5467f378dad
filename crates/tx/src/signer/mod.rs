// Path: crates/tx/src/signer/mod.rs
//! Local transaction signing.
//!
//! The signing digest is SHA-256 over the chain id, the packed transaction and
//! 32 zero bytes standing in for the (empty) context-free data hash. The
//! digest always covers the uncompressed bytes; compression only changes what
//! is sent.

use crate::codec;
use crate::compress::zlib_compress;
use async_trait::async_trait;
use cryptonym_api::chain::TransactionSigner;
use cryptonym_api::crypto::DigestSigner;
use cryptonym_api::error::ChainError;
use cryptonym_crypto::algorithms::hash::sha256_concat;
use cryptonym_types::chain::{ChainContext, Compression, PackedTransaction, Transaction};
use std::sync::Arc;

const EMPTY_CONTEXT_FREE_HASH: [u8; 32] = [0; 32];

/// Signs with a key held in process.
#[derive(Clone)]
pub struct LocalSigner {
    key: Arc<dyn DigestSigner>,
}

impl LocalSigner {
    /// Signs with `key`.
    pub fn new(key: Arc<dyn DigestSigner>) -> Self {
        Self { key }
    }
}

/// The digest a transaction's signatures cover.
pub fn signing_digest(chain_id: &[u8; 32], packed: &[u8]) -> [u8; 32] {
    sha256_concat(&[chain_id.as_slice(), packed, EMPTY_CONTEXT_FREE_HASH.as_slice()])
}

#[async_trait]
impl TransactionSigner for LocalSigner {
    async fn sign(
        &self,
        tx: &Transaction,
        ctx: &ChainContext,
        compression: Compression,
    ) -> Result<(serde_json::Value, PackedTransaction), ChainError> {
        let packed = codec::transaction_bytes(tx).map_err(|e| ChainError::Signing(e.to_string()))?;
        let signature = self.key.sign_digest(&signing_digest(&ctx.chain_id, &packed))?;
        let wire = match compression {
            Compression::None => packed,
            Compression::Zlib => {
                zlib_compress(&packed).map_err(|e| ChainError::Signing(e.to_string()))?
            }
        };
        let signed = PackedTransaction {
            signatures: vec![signature],
            compression,
            packed_context_free_data: String::new(),
            packed_trx: hex::encode(wire),
        };
        let display = serde_json::json!({
            "signatures": signed.signatures,
            "compression": compression,
            "transaction": tx,
        });
        Ok((display, signed))
    }
}
