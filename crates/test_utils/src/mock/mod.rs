// Path: crates/test_utils/src/mock/mod.rs
//! An in-memory chain connection.
//!
//! `MockChain` implements every collaborator trait. Action data is "encoded"
//! as the JSON it was given, and transactions are signed over their JSON form,
//! so tests can inspect exactly what the pipeline produced. Failures and
//! latency are toggled per instance.

use async_trait::async_trait;
use cryptonym_api::chain::{
    ActionEncoder, ChainConnection, ChainQuery, ConnectionFactory, SchemaSource, Submitter,
    TransactionSigner,
};
use cryptonym_api::crypto::DigestSigner;
use cryptonym_api::error::{ChainError, EncodeError};
use cryptonym_crypto::algorithms::hash::sha256_concat;
use cryptonym_types::abi::AbiDef;
use cryptonym_types::chain::{ChainContext, Compression, PackedTransaction, ProducerInfo, Transaction};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::fixtures;

/// A configurable in-memory chain.
pub struct MockChain {
    abis: Mutex<HashMap<String, AbiDef>>,
    producers: Mutex<Vec<ProducerInfo>>,
    tables: Mutex<HashMap<String, Vec<serde_json::Value>>>,
    context: ChainContext,
    signer: Arc<dyn DigestSigner>,
    response: Mutex<serde_json::Value>,
    submit_delay: Mutex<Option<Duration>>,
    /// Reject every submission with status 500.
    pub fail_submit: AtomicBool,
    /// Fail every schema fetch.
    pub fail_schema: AtomicBool,
    /// Fail every producers query.
    pub fail_producers: AtomicBool,
    /// Fail every table query.
    pub fail_tables: AtomicBool,
    /// Number of schema fetches.
    pub schema_fetches: AtomicUsize,
    /// Number of submissions, successful or not.
    pub submits: AtomicUsize,
    encoded: Mutex<Vec<serde_json::Value>>,
    signed: Mutex<Vec<Transaction>>,
}

impl MockChain {
    /// A chain serving the token and address schemas, signing with `signer`.
    pub fn new(signer: Arc<dyn DigestSigner>) -> Self {
        let mut abis = HashMap::new();
        abis.insert("fio.token".to_string(), fixtures::token_abi());
        abis.insert("fio.address".to_string(), fixtures::address_abi());
        Self {
            abis: Mutex::new(abis),
            producers: Mutex::new(fixtures::producers(40)),
            tables: Mutex::new(HashMap::new()),
            context: fixtures::test_context(),
            signer,
            response: Mutex::new(fixtures::push_response(64)),
            submit_delay: Mutex::new(None),
            fail_submit: AtomicBool::new(false),
            fail_schema: AtomicBool::new(false),
            fail_producers: AtomicBool::new(false),
            fail_tables: AtomicBool::new(false),
            schema_fetches: AtomicUsize::new(0),
            submits: AtomicUsize::new(0),
            encoded: Mutex::new(Vec::new()),
            signed: Mutex::new(Vec::new()),
        }
    }

    /// A chain signing with the fixture identity's key.
    pub fn with_test_identity() -> Self {
        Self::new(fixtures::test_identity().signer)
    }

    /// Serves `abi` for `contract`.
    pub fn insert_abi(&self, contract: &str, abi: AbiDef) {
        self.abis.lock().insert(contract.to_string(), abi);
    }

    /// Replaces the producers list.
    pub fn set_producers(&self, producers: Vec<ProducerInfo>) {
        *self.producers.lock() = producers;
    }

    /// Serves `rows` for `code`'s `table` under `scope`.
    pub fn set_table_rows(&self, code: &str, scope: &str, table: &str, rows: Vec<serde_json::Value>) {
        self.tables.lock().insert(table_key(code, scope, table), rows);
    }

    /// Replaces the push response body.
    pub fn set_response(&self, response: serde_json::Value) {
        *self.response.lock() = response;
    }

    /// Delays every submission by `delay`.
    pub fn set_submit_delay(&self, delay: Option<Duration>) {
        *self.submit_delay.lock() = delay;
    }

    /// Every action payload handed to the encoder, in order.
    pub fn encoded(&self) -> Vec<serde_json::Value> {
        self.encoded.lock().clone()
    }

    /// Every transaction handed to the signer, in order.
    pub fn signed(&self) -> Vec<Transaction> {
        self.signed.lock().clone()
    }

    /// The chain context returned to callers.
    pub fn context(&self) -> &ChainContext {
        &self.context
    }
}

#[async_trait]
impl SchemaSource for MockChain {
    async fn fetch_schema(&self, contract: &str) -> Result<AbiDef, ChainError> {
        self.schema_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_schema.load(Ordering::SeqCst) {
            return Err(ChainError::Transport("schema unavailable".into()));
        }
        self.abis
            .lock()
            .get(contract)
            .cloned()
            .ok_or_else(|| ChainError::Rejected {
                status: 500,
                body: format!("unknown contract {contract}"),
            })
    }
}

impl ActionEncoder for MockChain {
    fn encode_action(
        &self,
        abi: &AbiDef,
        action: &str,
        json: &serde_json::Value,
    ) -> Result<Vec<u8>, EncodeError> {
        if abi.find_struct(abi.action_struct_name(action)).is_none() {
            return Err(EncodeError::UnknownAction(action.to_string()));
        }
        self.encoded.lock().push(json.clone());
        Ok(serde_json::to_vec(json)?)
    }
}

#[async_trait]
impl TransactionSigner for MockChain {
    async fn sign(
        &self,
        tx: &Transaction,
        ctx: &ChainContext,
        compression: Compression,
    ) -> Result<(serde_json::Value, PackedTransaction), ChainError> {
        let bytes = serde_json::to_vec(tx)?;
        let digest = sha256_concat(&[ctx.chain_id.as_slice(), bytes.as_slice()]);
        let signature = self.signer.sign_digest(&digest)?;
        self.signed.lock().push(tx.clone());
        let packed = PackedTransaction {
            signatures: vec![signature],
            compression,
            packed_context_free_data: String::new(),
            packed_trx: hex::encode(&bytes),
        };
        let display = serde_json::json!({
            "signatures": packed.signatures,
            "compression": compression,
            "transaction": tx,
        });
        Ok((display, packed))
    }
}

#[async_trait]
impl Submitter for MockChain {
    async fn submit(
        &self,
        _endpoint: &str,
        _packed: &PackedTransaction,
    ) -> Result<Vec<u8>, ChainError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        let delay = *self.submit_delay.lock();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ChainError::Rejected {
                status: 500,
                body: r#"{"code":500,"message":"Internal Service Error","error":{"code":3050003}}"#
                    .into(),
            });
        }
        Ok(serde_json::to_vec(&*self.response.lock())?)
    }
}

#[async_trait]
impl ChainQuery for MockChain {
    async fn chain_context(&self) -> Result<ChainContext, ChainError> {
        Ok(self.context.clone())
    }

    async fn producers(&self) -> Result<Vec<ProducerInfo>, ChainError> {
        if self.fail_producers.load(Ordering::SeqCst) {
            return Err(ChainError::Timeout(5_000));
        }
        Ok(self.producers.lock().clone())
    }

    async fn table_rows(
        &self,
        code: &str,
        scope: &str,
        table: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ChainError> {
        if self.fail_tables.load(Ordering::SeqCst) {
            return Err(ChainError::Timeout(5_000));
        }
        let tables = self.tables.lock();
        let rows = tables.get(&table_key(code, scope, table)).map(Vec::as_slice).unwrap_or_default();
        Ok(rows.iter().take(limit as usize).cloned().collect())
    }
}

fn table_key(code: &str, scope: &str, table: &str) -> String {
    format!("{code}:{scope}:{table}")
}

/// Hands out one shared [`MockChain`] to every worker.
pub struct MockFactory {
    chain: Arc<MockChain>,
    /// Number of connections opened.
    pub connects: AtomicUsize,
    /// Fail every connection attempt.
    pub fail_connect: AtomicBool,
}

impl MockFactory {
    /// A factory over `chain`.
    pub fn new(chain: Arc<MockChain>) -> Self {
        Self {
            chain,
            connects: AtomicUsize::new(0),
            fail_connect: AtomicBool::new(false),
        }
    }

    /// The shared chain.
    pub fn chain(&self) -> &Arc<MockChain> {
        &self.chain
    }
}

#[async_trait]
impl ConnectionFactory for MockFactory {
    async fn connect(&self, _worker: usize) -> Result<Arc<dyn ChainConnection>, ChainError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ChainError::Transport("connection refused".into()));
        }
        let conn: Arc<dyn ChainConnection> = self.chain.clone();
        Ok(conn)
    }
}
