// Path: crates/api/src/chain/mod.rs
//! Collaborator traits for schema lookup, encoding, signing and submission.
//!
//! The payload pipeline only ever talks to a chain through these traits. A
//! production connection implements them over HTTP, and tests use an
//! in-memory mock.

use crate::error::{ChainError, EncodeError};
use async_trait::async_trait;
use cryptonym_types::abi::AbiDef;
use cryptonym_types::chain::{ChainContext, Compression, PackedTransaction, ProducerInfo, Transaction};
use std::sync::Arc;

/// Fetches a contract's authoritative schema.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Returns the ABI of `contract`.
    async fn fetch_schema(&self, contract: &str) -> Result<AbiDef, ChainError>;
}

/// Binary-encodes JSON action data against a schema.
pub trait ActionEncoder: Send + Sync {
    /// Encodes `json` as the data of `action`, using the struct that `abi`
    /// binds to that action.
    fn encode_action(
        &self,
        abi: &AbiDef,
        action: &str,
        json: &serde_json::Value,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Finalizes and signs a transaction.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Signs `tx` against `ctx`, packing it with `compression`.
    ///
    /// Returns a JSON rendering of the signed request for display, and the
    /// packed transaction to submit.
    async fn sign(
        &self,
        tx: &Transaction,
        ctx: &ChainContext,
        compression: Compression,
    ) -> Result<(serde_json::Value, PackedTransaction), ChainError>;
}

/// Submits a packed transaction.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Pushes `packed` to `endpoint` and returns the raw response body.
    async fn submit(&self, endpoint: &str, packed: &PackedTransaction)
        -> Result<Vec<u8>, ChainError>;
}

/// Read-only chain queries used while building transactions.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Returns the chain id and a recent reference block.
    async fn chain_context(&self) -> Result<ChainContext, ChainError>;

    /// Returns the registered block producers.
    async fn producers(&self) -> Result<Vec<ProducerInfo>, ChainError>;

    /// Returns up to `limit` rows of `code`'s `table` under `scope`, as JSON.
    async fn table_rows(
        &self,
        code: &str,
        scope: &str,
        table: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ChainError>;
}

/// Everything a worker needs from one connection.
pub trait ChainConnection:
    SchemaSource + ActionEncoder + TransactionSigner + Submitter + ChainQuery
{
}

impl<T> ChainConnection for T where
    T: SchemaSource + ActionEncoder + TransactionSigner + Submitter + ChainQuery
{
}

/// Creates independent connections, one per worker.
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Opens a new connection for `worker`.
    async fn connect(&self, worker: usize) -> Result<Arc<dyn ChainConnection>, ChainError>;
}
