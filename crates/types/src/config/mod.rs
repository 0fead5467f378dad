// Path: crates/types/src/config/mod.rs

//! Configuration structures for chain access, batch runs and action specs.
use crate::chain::Compression;
use crate::error::BatchError;
use serde::{Deserialize, Serialize};

/// The iteration count used for a looping run.
pub const LOOP_ITERATIONS: u64 = i32::MAX as u64;
/// Seconds from head block time until a transaction expires, unless configured.
pub const DEFAULT_EXPIRATION_SECS: u32 = 120;

/// Connection settings for a chain node.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Base URL of the node's HTTP API.
    pub url: String,
    /// Path the packed transaction is pushed to.
    #[serde(default = "default_push_endpoint")]
    pub push_endpoint: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Seconds from head block time until a transaction expires.
    #[serde(default = "default_expiration_secs")]
    pub expiration_secs: u32,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_push_endpoint() -> String {
    "/v1/chain/push_transaction".to_string()
}
fn default_timeout_ms() -> u64 {
    5_000
}
fn default_expiration_secs() -> u32 {
    DEFAULT_EXPIRATION_SECS
}
fn default_user_agent() -> String {
    concat!("cryptonym/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ChainConfig {
    /// A config for `url` with every other setting at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            push_endpoint: default_push_endpoint(),
            timeout_ms: default_timeout_ms(),
            expiration_secs: default_expiration_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// How many times a batch run repeats.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    /// A fixed number of attempts across all workers.
    Count(u64),
    /// Run until stopped.
    Loop,
}

impl Repeat {
    /// The total attempt budget.
    pub fn total(&self) -> u64 {
        match self {
            Self::Count(n) => *n,
            Self::Loop => LOOP_ITERATIONS,
        }
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Count(1)
    }
}

/// The name given to a multisig proposal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProposalName {
    /// Use this name for every proposal.
    Fixed(String),
    /// Generate a fresh 12-character name per proposal.
    #[default]
    Random,
}

/// Multisig reshaping parameters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MsigConfig {
    /// The multisig account that authorizes the inner action.
    pub account: String,
    /// Comma-separated requested signer accounts.
    pub signers: String,
    /// How the proposal is named.
    #[serde(default)]
    pub proposal_name: ProposalName,
    /// When set, the inner transaction is wrapped in an `eosio.wrap::exec`
    /// and authorized by this actor.
    #[serde(default)]
    pub wrap_actor: Option<String>,
    /// The chain's propose fee, in whole FIO.
    #[serde(default = "default_propose_fee")]
    pub propose_fee: f64,
}

fn default_propose_fee() -> f64 {
    40.0
}

impl MsigConfig {
    /// The requested signer accounts, trimmed, with empties removed.
    pub fn signer_list(&self) -> Vec<String> {
        self.signers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Settings for a batch submission run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Total attempts, or loop until stopped.
    #[serde(default)]
    pub repeat: Repeat,
    /// Number of concurrent workers.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Do not retain request bodies in the history.
    #[serde(default)]
    pub hide_request: bool,
    /// Do not retain response bodies in the history.
    #[serde(default)]
    pub hide_response: bool,
    /// Do not retain failed outcomes in the history.
    #[serde(default)]
    pub hide_failed: bool,
    /// Do not retain successful outcomes in the history.
    #[serde(default)]
    pub hide_succeeded: bool,
    /// Transaction packing compression.
    #[serde(default)]
    pub compression: Compression,
    /// Deferral delay in seconds, zero for none.
    #[serde(default)]
    pub delay_secs: u32,
    /// Multisig reshaping, if any.
    #[serde(default)]
    pub msig: Option<MsigConfig>,
    /// Store history bodies zlib-compressed.
    #[serde(default = "default_true")]
    pub compress_history: bool,
}

fn default_workers() -> usize {
    1
}
fn default_true() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            repeat: Repeat::default(),
            workers: default_workers(),
            hide_request: false,
            hide_response: false,
            hide_failed: false,
            hide_succeeded: false,
            compression: Compression::default(),
            delay_secs: 0,
            msig: None,
            compress_history: true,
        }
    }
}

impl BatchConfig {
    /// Checks the invariants a run depends on.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.workers == 0 {
            return Err(BatchError::InvalidConfig(
                "at least one worker is required".into(),
            ));
        }
        if self.repeat == Repeat::Count(0) {
            return Err(BatchError::InvalidConfig(
                "repeat count must be at least 1".into(),
            ));
        }
        if let Some(msig) = &self.msig {
            if msig.account.is_empty() {
                return Err(BatchError::InvalidConfig("multisig account is empty".into()));
            }
            if msig.signer_list().is_empty() {
                return Err(BatchError::InvalidConfig(
                    "multisig needs at least one signer".into(),
                ));
            }
        }
        Ok(())
    }
}

/// One `[[fields]]` entry of an action spec file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldSpecConfig {
    /// The field name.
    pub name: String,
    /// The declared wire type.
    #[serde(rename = "type")]
    pub declared_type: String,
    /// The generation mode label.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// The variant label.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// The length selector text.
    #[serde(default)]
    pub length: Option<String>,
    /// The literal input.
    #[serde(default)]
    pub input: String,
}

fn default_mode() -> String {
    "form value".to_string()
}
fn default_variant() -> String {
    "as is".to_string()
}

/// An action described field by field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    /// The contract account.
    pub contract: String,
    /// The action name.
    pub action: String,
    /// The fields, in order.
    #[serde(default)]
    pub fields: Vec<FieldSpecConfig>,
}

/// The signature scheme of an identity key.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlgorithm {
    /// secp256k1 ECDSA, the chain's native key type.
    #[default]
    #[serde(alias = "secp256k1")]
    K1,
    /// Ed25519.
    Ed25519,
}

/// The signing identity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// The actor; derived from the public key when absent.
    #[serde(default)]
    pub actor: Option<String>,
    /// The key's signature scheme.
    #[serde(default)]
    pub algorithm: KeyAlgorithm,
    /// The 32-byte secret key, hex encoded.
    pub seed_hex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_defaults_to_k1() {
        let id: IdentityConfig = toml::from_str("seed_hex = \"00\"").unwrap();
        assert_eq!(id.algorithm, KeyAlgorithm::K1);
        let id: IdentityConfig =
            toml::from_str("seed_hex = \"00\"\nalgorithm = \"ed25519\"").unwrap();
        assert_eq!(id.algorithm, KeyAlgorithm::Ed25519);
        let id: IdentityConfig =
            toml::from_str("seed_hex = \"00\"\nalgorithm = \"secp256k1\"").unwrap();
        assert_eq!(id.algorithm, KeyAlgorithm::K1);
    }

    #[test]
    fn action_spec_parses_from_toml() {
        let spec: ActionSpec = toml::from_str(
            r#"
            contract = "fio.token"
            action = "trnsfiopubky"

            [[fields]]
            name = "amount"
            type = "int64"
            variant = "FIO -> suf"
            input = "50"

            [[fields]]
            name = "memo"
            type = "string"
            mode = "bytes/string"
            variant = "string"
            length = "8"
            "#,
        )
        .unwrap();
        assert_eq!(spec.fields.len(), 2);
        assert_eq!(spec.fields[0].mode, "form value");
        assert_eq!(spec.fields[1].length.as_deref(), Some("8"));
    }

    #[test]
    fn batch_config_defaults_and_validation() {
        let cfg: BatchConfig = toml::from_str("workers = 4\nrepeat = \"loop\"").unwrap();
        assert_eq!(cfg.repeat, Repeat::Loop);
        assert_eq!(cfg.repeat.total(), LOOP_ITERATIONS);
        assert!(cfg.compress_history);
        assert!(cfg.validate().is_ok());

        let bad = BatchConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(BatchError::InvalidConfig(_))));

        let counted: BatchConfig = toml::from_str("[repeat]\ncount = 5").unwrap();
        assert_eq!(counted.repeat, Repeat::Count(5));
    }

    #[test]
    fn chain_config_defaults() {
        let cfg: ChainConfig = toml::from_str("url = \"http://127.0.0.1:8888\"").unwrap();
        assert_eq!(cfg.push_endpoint, "/v1/chain/push_transaction");
        assert_eq!(cfg.timeout_ms, 5_000);
    }

    #[test]
    fn signer_list_trims() {
        let m = MsigConfig {
            account: "multi".into(),
            signers: " bob, alice ,,".into(),
            proposal_name: ProposalName::Random,
            wrap_actor: None,
            propose_fee: 1.0,
        };
        assert_eq!(m.signer_list(), vec!["bob".to_string(), "alice".to_string()]);
    }
}
