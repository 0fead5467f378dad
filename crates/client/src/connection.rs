// Path: crates/client/src/connection.rs
//! A complete worker connection: remote queries and push over HTTP, with
//! encoding and signing done in process.

use crate::rpc::HttpChainClient;
use async_trait::async_trait;
use cryptonym_api::chain::{
    ActionEncoder, ChainConnection, ChainQuery, ConnectionFactory, SchemaSource, Submitter,
    TransactionSigner,
};
use cryptonym_api::crypto::DigestSigner;
use cryptonym_api::error::{ChainError, EncodeError};
use cryptonym_tx::{AbiEncoder, LocalSigner};
use cryptonym_types::abi::AbiDef;
use cryptonym_types::chain::{ChainContext, Compression, PackedTransaction, ProducerInfo, Transaction};
use cryptonym_types::config::ChainConfig;
use std::sync::Arc;

/// One node connection with a local encoder and signer.
pub struct HttpConnection {
    rpc: HttpChainClient,
    encoder: AbiEncoder,
    signer: LocalSigner,
}

impl HttpConnection {
    /// Connects to the node in `cfg`, signing with `key`.
    pub fn new(cfg: &ChainConfig, key: Arc<dyn DigestSigner>) -> Result<Self, ChainError> {
        Ok(Self {
            rpc: HttpChainClient::new(cfg)?,
            encoder: AbiEncoder,
            signer: LocalSigner::new(key),
        })
    }

    /// The underlying RPC client.
    pub fn rpc(&self) -> &HttpChainClient {
        &self.rpc
    }
}

#[async_trait]
impl SchemaSource for HttpConnection {
    async fn fetch_schema(&self, contract: &str) -> Result<AbiDef, ChainError> {
        self.rpc.fetch_schema(contract).await
    }
}

impl ActionEncoder for HttpConnection {
    fn encode_action(
        &self,
        abi: &AbiDef,
        action: &str,
        json: &serde_json::Value,
    ) -> Result<Vec<u8>, EncodeError> {
        self.encoder.encode_action(abi, action, json)
    }
}

#[async_trait]
impl TransactionSigner for HttpConnection {
    async fn sign(
        &self,
        tx: &Transaction,
        ctx: &ChainContext,
        compression: Compression,
    ) -> Result<(serde_json::Value, PackedTransaction), ChainError> {
        self.signer.sign(tx, ctx, compression).await
    }
}

#[async_trait]
impl Submitter for HttpConnection {
    async fn submit(&self, endpoint: &str, packed: &PackedTransaction) -> Result<Vec<u8>, ChainError> {
        self.rpc.submit(endpoint, packed).await
    }
}

#[async_trait]
impl ChainQuery for HttpConnection {
    async fn chain_context(&self) -> Result<ChainContext, ChainError> {
        self.rpc.chain_context().await
    }

    async fn producers(&self) -> Result<Vec<ProducerInfo>, ChainError> {
        self.rpc.producers().await
    }

    async fn table_rows(
        &self,
        code: &str,
        scope: &str,
        table: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ChainError> {
        self.rpc.table_rows(code, scope, table, limit).await
    }
}

/// Opens a fresh [`HttpConnection`] for every worker.
pub struct HttpConnectionFactory {
    cfg: ChainConfig,
    key: Arc<dyn DigestSigner>,
}

impl HttpConnectionFactory {
    /// A factory for the node in `cfg`, signing with `key`.
    pub fn new(cfg: ChainConfig, key: Arc<dyn DigestSigner>) -> Self {
        Self { cfg, key }
    }
}

#[async_trait]
impl ConnectionFactory for HttpConnectionFactory {
    async fn connect(&self, worker: usize) -> Result<Arc<dyn ChainConnection>, ChainError> {
        tracing::debug!(target: "client", worker, url = %self.cfg.url, "opening connection");
        let conn: Arc<dyn ChainConnection> = Arc::new(HttpConnection::new(&self.cfg, self.key.clone())?);
        Ok(conn)
    }
}
