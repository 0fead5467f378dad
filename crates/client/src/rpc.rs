// Path: crates/client/src/rpc.rs
//! JSON-over-HTTP calls against the node's chain API.

use async_trait::async_trait;
use cryptonym_api::chain::{ChainQuery, SchemaSource, Submitter};
use cryptonym_api::error::ChainError;
use cryptonym_tx::abi::parse_time_point_sec;
use cryptonym_types::abi::AbiDef;
use cryptonym_types::chain::{ChainContext, PackedTransaction, ProducerInfo};
use cryptonym_types::config::ChainConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GET_INFO: &str = "/v1/chain/get_info";
const GET_ABI: &str = "/v1/chain/get_abi";
const GET_PRODUCERS: &str = "/v1/chain/get_producers";
const GET_TABLE_ROWS: &str = "/v1/chain/get_table_rows";
const PRODUCERS_LIMIT: u32 = 1_000;

/// The subset of `get_info` needed to reference a block.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InfoResponse {
    /// The chain id, hex encoded.
    pub chain_id: String,
    /// The last irreversible block number.
    pub last_irreversible_block_num: u32,
    /// The last irreversible block id, hex encoded.
    pub last_irreversible_block_id: String,
    /// The head block time.
    pub head_block_time: String,
}

#[derive(Deserialize)]
struct AbiResponse {
    #[serde(default)]
    abi: Option<AbiDef>,
}

#[derive(Deserialize)]
struct ProducersResponse {
    #[serde(default, alias = "rows")]
    producers: Vec<ProducerInfo>,
}

#[derive(Deserialize)]
struct TableRowsResponse {
    #[serde(default)]
    rows: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct TableRowsRequest<'a> {
    code: &'a str,
    scope: &'a str,
    table: &'a str,
    limit: u32,
    json: bool,
}

#[derive(Serialize)]
struct AbiRequest<'a> {
    account_name: &'a str,
}

#[derive(Serialize)]
struct ProducersRequest {
    limit: u32,
    json: bool,
}

/// Derives the signing context from a `get_info` response.
///
/// The reference block is the last irreversible block: its number truncated
/// to 16 bits, and its prefix read little-endian from bytes 8..12 of the id.
pub fn context_from_info(info: &InfoResponse) -> Result<ChainContext, ChainError> {
    let chain_id: [u8; 32] = hex::decode(&info.chain_id)
        .map_err(|e| ChainError::Decode(format!("chain_id: {e}")))?
        .try_into()
        .map_err(|_| ChainError::Decode("chain_id is not 32 bytes".into()))?;
    let block_id = hex::decode(&info.last_irreversible_block_id)
        .map_err(|e| ChainError::Decode(format!("block id: {e}")))?;
    let prefix: [u8; 4] = block_id
        .get(8..12)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| ChainError::Decode("block id too short".into()))?;
    let head_block_time =
        parse_time_point_sec(&info.head_block_time).map_err(ChainError::Decode)?;
    Ok(ChainContext {
        chain_id,
        ref_block_num: (info.last_irreversible_block_num & 0xffff) as u16,
        ref_block_prefix: u32::from_le_bytes(prefix),
        head_block_time,
    })
}

/// A client for one node.
#[derive(Clone)]
pub struct HttpChainClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpChainClient {
    /// Builds a client from `cfg`, with its timeout and user agent.
    pub fn new(cfg: &ChainConfig) -> Result<Self, ChainError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| ChainError::Transport(format!("could not build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            timeout_ms: cfg.timeout_ms,
        })
    }

    /// The node's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_err(&self, e: reqwest::Error) -> ChainError {
        if e.is_timeout() {
            ChainError::Timeout(self.timeout_ms)
        } else {
            ChainError::Transport(e.to_string())
        }
    }

    /// POSTs `body` as JSON to `path` and returns the raw response body.
    ///
    /// Any non-2xx status is a rejection carrying the body verbatim.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>, ChainError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| self.map_err(e))?;
        if !status.is_success() {
            tracing::debug!(target: "client", %url, status = status.as_u16(), "request rejected");
            return Err(ChainError::Rejected {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes.to_vec())
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ChainError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let bytes = self.post_raw(path, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| ChainError::Decode(format!("{path}: {e}")))
    }

    /// Fetches `get_info`.
    pub async fn info(&self) -> Result<InfoResponse, ChainError> {
        self.post_json(GET_INFO, &serde_json::json!({})).await
    }
}

#[async_trait]
impl SchemaSource for HttpChainClient {
    async fn fetch_schema(&self, contract: &str) -> Result<AbiDef, ChainError> {
        let resp: AbiResponse = self
            .post_json(GET_ABI, &AbiRequest {
                account_name: contract,
            })
            .await?;
        resp.abi
            .ok_or_else(|| ChainError::Decode(format!("no abi published for '{contract}'")))
    }
}

#[async_trait]
impl ChainQuery for HttpChainClient {
    async fn chain_context(&self) -> Result<ChainContext, ChainError> {
        context_from_info(&self.info().await?)
    }

    async fn producers(&self) -> Result<Vec<ProducerInfo>, ChainError> {
        let resp: ProducersResponse = self
            .post_json(GET_PRODUCERS, &ProducersRequest {
                limit: PRODUCERS_LIMIT,
                json: true,
            })
            .await?;
        Ok(resp.producers)
    }

    async fn table_rows(
        &self,
        code: &str,
        scope: &str,
        table: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ChainError> {
        let resp: TableRowsResponse = self
            .post_json(GET_TABLE_ROWS, &TableRowsRequest {
                code,
                scope,
                table,
                limit,
                json: true,
            })
            .await?;
        Ok(resp.rows)
    }
}

#[async_trait]
impl Submitter for HttpChainClient {
    async fn submit(&self, endpoint: &str, packed: &PackedTransaction) -> Result<Vec<u8>, ChainError> {
        self.post_raw(endpoint, packed).await
    }
}
