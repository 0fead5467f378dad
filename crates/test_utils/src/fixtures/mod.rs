// Path: crates/test_utils/src/fixtures/mod.rs
//! Test fixtures for reproducible tests

use cryptonym_api::identity::SignerIdentity;
use cryptonym_crypto::sign::ecdsa::Secp256k1KeyPair;
use cryptonym_types::abi::AbiDef;
use cryptonym_types::chain::{ChainContext, ProducerInfo};
use cryptonym_types::config::{ActionSpec, FieldSpecConfig};
use std::sync::Arc;

/// A fixed 32-byte secret key used by [`test_identity`].
pub const TEST_SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

/// The `fio.token` schema with its `trnsfiopubky` action.
pub fn token_abi() -> AbiDef {
    abi_from_json(serde_json::json!({
        "version": "eosio::abi/1.1",
        "types": [],
        "structs": [{
            "name": "trnsfiopubky",
            "base": "",
            "fields": [
                {"name": "payee_public_key", "type": "string"},
                {"name": "amount", "type": "int64"},
                {"name": "max_fee", "type": "int64"},
                {"name": "actor", "type": "name"},
                {"name": "tpid", "type": "string"}
            ]
        }],
        "actions": [{"name": "trnsfiopubky", "type": "trnsfiopubky", "ricardian_contract": ""}],
        "tables": []
    }))
}

/// The `fio.address` schema with its `addaddress` action.
pub fn address_abi() -> AbiDef {
    abi_from_json(serde_json::json!({
        "version": "eosio::abi/1.1",
        "types": [],
        "structs": [
            {
                "name": "tokenpubaddr",
                "base": "",
                "fields": [
                    {"name": "token_code", "type": "string"},
                    {"name": "chain_code", "type": "string"},
                    {"name": "public_address", "type": "string"}
                ]
            },
            {
                "name": "addaddress",
                "base": "",
                "fields": [
                    {"name": "fio_address", "type": "string"},
                    {"name": "public_addresses", "type": "tokenpubaddr[]"},
                    {"name": "max_fee", "type": "int64"},
                    {"name": "actor", "type": "name"},
                    {"name": "tpid", "type": "string"}
                ]
            }
        ],
        "actions": [{"name": "addaddress", "type": "addaddress", "ricardian_contract": ""}],
        "tables": []
    }))
}

fn abi_from_json(v: serde_json::Value) -> AbiDef {
    serde_json::from_value(v).unwrap_or_default()
}

/// A deterministic signing identity.
pub fn test_identity() -> SignerIdentity {
    let key = match Secp256k1KeyPair::from_seed_hex(TEST_SEED_HEX) {
        Ok(k) => k,
        Err(_) => Secp256k1KeyPair::generate(),
    };
    let actor = key.derived_actor();
    SignerIdentity::new(actor, Arc::new(key))
}

/// A chain context with a fixed chain id and reference block.
pub fn test_context() -> ChainContext {
    ChainContext {
        chain_id: [0x21; 32],
        ref_block_num: 0x1234,
        ref_block_prefix: 0xdead_beef,
        head_block_time: 1_700_000_000,
    }
}

/// `count` producers with addresses of increasing length.
pub fn producers(count: usize) -> Vec<ProducerInfo> {
    (0..count)
        .map(|i| ProducerInfo {
            owner: format!("producer{}", i % 10),
            fio_address: format!("bp{}@{}", i, "x".repeat(i % 7 + 1)),
            is_active: 1,
        })
        .collect()
}

/// A push-transaction response body with one action trace of `data_len` bytes.
pub fn push_response(data_len: usize) -> serde_json::Value {
    serde_json::json!({
        "transaction_id": "4f8a0e3c",
        "processed": {
            "block_num": 1024,
            "block_time": "2023-11-14T22:13:20.000",
            "receipt": {"status": "executed"},
            "action_traces": [{"act": {"hex_data": "ab".repeat(data_len)}}]
        }
    })
}

/// A `trnsfiopubky` action spec paying 1,000 FIO to the signer's own key.
pub fn transfer_spec() -> ActionSpec {
    let field = |name: &str, ty: &str, mode: &str, variant: &str, input: &str| FieldSpecConfig {
        name: name.to_string(),
        declared_type: ty.to_string(),
        mode: mode.to_string(),
        variant: variant.to_string(),
        length: None,
        input: input.to_string(),
    };
    ActionSpec {
        contract: "fio.token".to_string(),
        action: "trnsfiopubky".to_string(),
        fields: vec![
            field("payee_public_key", "string", "pub key", "mine", ""),
            field("amount", "int64", "form value", "FIO -> suf", "1,000.00"),
            field("max_fee", "int64", "form value", "FIO -> suf", "10,000.00"),
            field("actor", "name", "actor", "mine", ""),
            field("tpid", "string", "form value", "as is", ""),
        ],
    }
}
