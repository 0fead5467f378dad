// Path: crates/tx/src/defaults.rs
//! Builds a field table from a contract schema, pre-filled with plausible
//! inputs so that most actions can be sent without further editing.

use crate::table::FieldSpecTable;
use cryptonym_api::error::EncodeError;
use cryptonym_api::identity::SignerIdentity;
use cryptonym_fuzzer::bytes::random_checksum;
use cryptonym_fuzzer::numeric::random_int128;
use cryptonym_types::abi::{AbiDef, FieldDef};
use cryptonym_types::field::{FormVariant, GenerationMode};
use rand::Rng;
use serde_json::json;

/// Domain used for generated addresses and domain-typed fields.
pub const DEFAULT_DOMAIN: &str = "cryptonym";
/// Input used for FIO amount fields that have no decimal default.
pub const DEFAULT_FIO_AMOUNT: &str = "10,000.00";

/// A plausible literal input for a field, based on its name and type.
pub fn default_input(name: &str, ty: &str, identity: &SignerIdentity) -> String {
    match name {
        "amount" => return "1,000.00".into(),
        "bundled_transactions" => return "100".into(),
        "can_vote" | "is_public" => return "1".into(),
        "url" => return "https://fioprotocol.io".into(),
        "location" => return "80".into(),
        "fio_domain" => return DEFAULT_DOMAIN.into(),
        "tpid" | "max_fee" => return String::new(),
        "owner" | "account" | "actor" | "proxy" => return identity.actor.clone(),
        _ => {}
    }
    if ty == "tokenpubaddr[]" {
        return json!([{
            "token_code": "FIO",
            "chain_code": "FIO",
            "public_address": identity.public_key,
        }])
        .to_string();
    }
    if name.contains("public") || name.ends_with("_key") {
        return identity.public_key.clone();
    }
    if name.ends_with("_address") || name.starts_with("pay") {
        return format!("{}@{DEFAULT_DOMAIN}", identity.actor);
    }
    match ty {
        "bool" => "true".into(),
        "authority" => json!({
            "threshold": 1,
            "keys": [],
            "waits": [],
            "accounts": [{"permission": {"actor": identity.actor, "permission": "active"}, "weight": 1}],
        })
        .to_string(),
        "int128" | "uint128" => random_int128().trim_start_matches('-').to_string(),
        "float32" | "float64" => "3.14159265359".into(),
        "asset" => "100000.000000000 FIO".into(),
        "checksum256" => hex::encode(random_checksum()),
        "permission_level" => {
            json!({"actor": identity.actor, "permission": "active"}).to_string()
        }
        "permission_level[]" => {
            json!([{"actor": identity.actor, "permission": "active"}]).to_string()
        }
        "name" if name == "permission" => "active".into(),
        "name" if name == "to" || name == "from" => identity.actor.clone(),
        t if t.starts_with("uint") || t.starts_with("int") => {
            rand::thread_rng().gen_range(0..256).to_string()
        }
        _ => String::new(),
    }
}

fn collect_fields(abi: &AbiDef, struct_name: &str, depth: usize, out: &mut Vec<FieldDef>) -> Result<(), EncodeError> {
    if depth > 32 {
        return Err(EncodeError::TooDeep(struct_name.to_string()));
    }
    let s = abi
        .find_struct(abi.resolve_alias(struct_name))
        .ok_or_else(|| EncodeError::UnknownType(struct_name.to_string()))?;
    if !s.base.is_empty() {
        collect_fields(abi, &s.base, depth + 1, out)?;
    }
    out.extend(s.fields.iter().cloned());
    Ok(())
}

/// A table for `contract::action` with one row per schema field, base
/// struct fields first, each pre-filled by [`default_input`].
///
/// Inputs that look like JSON objects or arrays of objects are sent as
/// structures, and `amount` and `max_fee` are converted from FIO.
pub fn table_from_schema(
    abi: &AbiDef,
    contract: &str,
    action: &str,
    identity: &SignerIdentity,
) -> Result<FieldSpecTable, EncodeError> {
    let struct_name = abi.action_struct_name(action);
    if abi.find_struct(struct_name).is_none() {
        return Err(EncodeError::UnknownAction(action.to_string()));
    }
    let mut fields = Vec::new();
    collect_fields(abi, struct_name, 0, &mut fields)?;

    let table = FieldSpecTable::new(contract, action);
    for f in &fields {
        if !table.append(&f.name, &f.type_name) {
            continue;
        }
        let mut input = default_input(&f.name, &f.type_name, identity);
        if input.starts_with('{') || input.starts_with("[{") {
            table.update_mode(&f.name, GenerationMode::FormValue(FormVariant::JsonToStruct));
        }
        if f.name == "amount" || f.name == "max_fee" {
            if !input.contains('.') {
                input = DEFAULT_FIO_AMOUNT.to_string();
            }
            table.update_mode(&f.name, GenerationMode::FormValue(FormVariant::FioToSuf));
        }
        table.update_input(&f.name, &input);
    }
    Ok(table)
}
