// Path: crates/types/src/chain/mod.rs
//! Transaction, action and permission structures.

use serde::{Deserialize, Serialize};

/// The permission name used for every authorization this tool creates.
pub const ACTIVE_PERMISSION: &str = "active";

/// An `actor@permission` pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PermissionLevel {
    /// The authorizing account.
    pub actor: String,
    /// The permission name on that account.
    pub permission: String,
}

impl PermissionLevel {
    /// An `actor@active` permission level.
    pub fn active(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            permission: ACTIVE_PERMISSION.to_string(),
        }
    }
}

/// A contract action with binary-encoded data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The contract account.
    pub account: String,
    /// The action name.
    pub name: String,
    /// The authorizations attached to the action.
    pub authorization: Vec<PermissionLevel>,
    /// Binary action data.
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

/// An unsigned transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    /// Expiration as seconds since the Unix epoch.
    pub expiration: u32,
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Prefix of the reference block id.
    pub ref_block_prefix: u32,
    /// Network usage limit in 8-byte words, zero for none.
    pub max_net_usage_words: u32,
    /// CPU usage limit in milliseconds, zero for none.
    pub max_cpu_usage_ms: u8,
    /// Deferral delay in seconds.
    pub delay_sec: u32,
    /// Context-free actions.
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    /// Actions.
    pub actions: Vec<Action>,
    /// Extensions, carried opaquely.
    #[serde(default)]
    pub transaction_extensions: Vec<serde_json::Value>,
}

impl Transaction {
    /// Creates a transaction carrying one action, with all header fields zeroed.
    pub fn with_action(action: Action) -> Self {
        Self {
            actions: vec![action],
            ..Default::default()
        }
    }

    /// Applies the chain reference fields and expiration.
    pub fn set_reference(&mut self, ctx: &ChainContext, expire_secs: u32) {
        self.ref_block_num = ctx.ref_block_num;
        self.ref_block_prefix = ctx.ref_block_prefix;
        self.expiration = ctx.head_block_time.saturating_add(expire_secs);
    }

    /// Zeroes expiration and reference fields, as required for a wrapped transaction.
    pub fn clear_reference(&mut self) {
        self.expiration = 0;
        self.ref_block_num = 0;
        self.ref_block_prefix = 0;
    }
}

/// Transaction packing compression.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Packed bytes are sent as-is.
    #[default]
    None,
    /// Packed bytes are zlib-compressed.
    Zlib,
}

impl std::str::FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "zlib" => Ok(Self::Zlib),
            other => Err(format!("unknown compression '{other}'")),
        }
    }
}

/// A signed, packed transaction ready to push.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackedTransaction {
    /// Signatures over the transaction digest.
    pub signatures: Vec<String>,
    /// The compression applied to `packed_trx`.
    pub compression: Compression,
    /// Packed context-free data, hex encoded.
    #[serde(default)]
    pub packed_context_free_data: String,
    /// The packed transaction, hex encoded.
    pub packed_trx: String,
}

impl PackedTransaction {
    /// The length of the packed transaction in bytes.
    pub fn packed_len(&self) -> usize {
        self.packed_trx.len() / 2
    }
}

/// Chain state needed to finalize a transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainContext {
    /// The 32-byte chain identifier.
    pub chain_id: [u8; 32],
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Prefix of the reference block id.
    pub ref_block_prefix: u32,
    /// Head block time as seconds since the Unix epoch.
    pub head_block_time: u32,
}

/// A registered block producer, as reported by the producers table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ProducerInfo {
    /// The producer account.
    #[serde(default)]
    pub owner: String,
    /// The producer's FIO address.
    #[serde(default)]
    pub fio_address: String,
    /// Whether the producer is active.
    #[serde(default)]
    pub is_active: u8,
}

/// Serializes a byte vector as lowercase hex.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes bytes as a hex string.
    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    /// Deserializes bytes from a hex string.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
