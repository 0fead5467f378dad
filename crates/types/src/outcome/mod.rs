// Path: crates/types/src/outcome/mod.rs
//! Submission outcomes and response summaries.

use serde::{Deserialize, Serialize};

/// Why an attempt failed. Used for display only.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The attempt failed before anything was sent.
    Preparation,
    /// The node or the network rejected the attempt.
    Remote,
}

/// A short summary of a submission response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TxSummary {
    /// The transaction id reported by the node.
    #[serde(default)]
    pub transaction_id: String,
    /// The block that included the transaction.
    #[serde(default)]
    pub block_num: u32,
    /// The block time reported by the node.
    #[serde(default)]
    pub block_time: String,
    /// The receipt status, e.g. `executed`.
    #[serde(default)]
    pub status: String,
    /// An error code from the node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<serde_json::Value>,
    /// Sum of the action data sizes across all action traces.
    #[serde(default)]
    pub total_bytes: usize,
}

#[derive(Deserialize, Default)]
struct RawResponse {
    #[serde(default)]
    transaction_id: String,
    #[serde(default)]
    processed: RawProcessed,
    #[serde(default)]
    error_code: Option<serde_json::Value>,
}

#[derive(Deserialize, Default)]
struct RawProcessed {
    #[serde(default)]
    block_num: u32,
    #[serde(default)]
    block_time: String,
    #[serde(default)]
    receipt: RawReceipt,
    #[serde(default)]
    action_traces: Vec<RawTrace>,
}

#[derive(Deserialize, Default)]
struct RawReceipt {
    #[serde(default)]
    status: String,
}

#[derive(Deserialize, Default)]
struct RawTrace {
    #[serde(default)]
    act: RawAct,
}

#[derive(Deserialize, Default)]
struct RawAct {
    #[serde(default)]
    hex_data: String,
}

impl TxSummary {
    /// Summarises a push-transaction response body.
    pub fn from_response(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawResponse = serde_json::from_slice(body)?;
        let total_bytes = raw
            .processed
            .action_traces
            .iter()
            .map(|t| t.act.hex_data.len() / 2)
            .sum();
        Ok(Self {
            transaction_id: raw.transaction_id,
            block_num: raw.processed.block_num,
            block_time: raw.processed.block_time,
            status: raw.processed.receipt.status,
            error_code: raw.error_code.filter(|v| !v.is_null()),
            total_bytes,
        })
    }
}

/// The record of one submission attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Globally unique, increasing attempt index.
    pub index: u64,
    /// Whether the node accepted the transaction.
    pub success: bool,
    /// The failure kind, for failed attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// The request body, or empty when hidden.
    #[serde(default)]
    pub request: Vec<u8>,
    /// The request body as stored, zlib-compressed when enabled.
    #[serde(default)]
    pub request_stored: Vec<u8>,
    /// The response body, or empty when hidden.
    #[serde(default)]
    pub response: Vec<u8>,
    /// The response body as stored, zlib-compressed when enabled.
    #[serde(default)]
    pub response_stored: Vec<u8>,
    /// A one-line description of the outcome.
    pub summary: String,
    /// A parsed response summary, for successful attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_summary: Option<TxSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_sums_hex_data_lengths() {
        let body = br#"{
            "transaction_id": "abc123",
            "processed": {
                "block_num": 42,
                "block_time": "2020-01-01T00:00:00.000",
                "receipt": {"status": "executed"},
                "action_traces": [
                    {"act": {"hex_data": "00112233"}},
                    {"act": {"hex_data": "aabb"}}
                ]
            }
        }"#;
        let s = TxSummary::from_response(body).unwrap();
        assert_eq!(s.transaction_id, "abc123");
        assert_eq!(s.block_num, 42);
        assert_eq!(s.status, "executed");
        assert_eq!(s.total_bytes, 6);
        assert!(s.error_code.is_none());
    }

    #[test]
    fn summary_rejects_non_json() {
        assert!(TxSummary::from_response(b"<html>").is_err());
    }
}
