// Path: crates/fuzzer/src/fio.rs
//! FIO addresses, domains and maximum-size payloads.

use crate::bytes::{random_bytes_encoded, ByteEncoding};
use crate::text::{bad_char, random_string, word};
use cryptonym_types::chain::ProducerInfo;
use rand::Rng;
use serde_json::json;

/// Maximum length of a FIO address, including the `@domain` part.
pub const MAX_ADDRESS_LEN: usize = 64;
/// Maximum length of a FIO domain.
pub const MAX_DOMAIN_LEN: usize = 62;
/// Most producers a single vote may name.
pub const MAX_VOTE_PRODUCERS: usize = 30;
/// Most public addresses a single `addaddress` may carry.
pub const MAX_PUB_ADDRESSES: usize = 5;
/// Contract and scope of the registered-names table.
pub const NAMES_CODE: &str = "fio.address";
/// The registered-names table.
pub const NAMES_TABLE: &str = "fionames";
/// Rows fetched when picking an existing address.
pub const NAMES_LIMIT: u32 = 500;

fn at_domain(domain: &str) -> String {
    if domain.starts_with('@') {
        domain.to_string()
    } else {
        format!("@{domain}")
    }
}

/// A random valid address at `domain`, keeping at most the last 64 characters.
pub fn address_at(domain: &str) -> String {
    let addr = format!("{}{}", word(), at_domain(domain));
    if addr.len() >= MAX_ADDRESS_LEN {
        let start = addr.len() - MAX_ADDRESS_LEN;
        return match addr.get(start..) {
            Some(tail) => tail.to_string(),
            None => {
                crate::warn(format!(
                    "cannot cut address at '{domain}' to {MAX_ADDRESS_LEN} bytes on a character boundary"
                ));
                String::new()
            }
        };
    }
    addr
}

/// An address at `domain` of exactly the maximum length.
///
/// If the domain alone is already too long, the result is just the domain.
pub fn max_address_at(domain: &str) -> String {
    let domain = at_domain(domain);
    if domain.len() >= MAX_ADDRESS_LEN {
        crate::warn(format!(
            "domain '{domain}' leaves no room for an address of {MAX_ADDRESS_LEN} characters"
        ));
        return domain;
    }
    let local = MAX_ADDRESS_LEN - domain.len();
    format!("{}{}", random_string(local), domain)
}

/// An address at `domain` with one bad character inside the local part.
pub fn invalid_address_at(domain: &str) -> String {
    format!("{}{}{}{}", word(), bad_char(), word(), at_domain(domain))
}

/// A random valid domain.
pub fn domain() -> String {
    word()
}

/// A domain of exactly the maximum length.
pub fn max_domain() -> String {
    random_string(MAX_DOMAIN_LEN)
}

/// A domain with one bad character at the front, middle or end.
pub fn invalid_domain() -> String {
    match rand::thread_rng().gen_range(0..3) {
        0 => format!("{}{}", bad_char(), word()),
        1 => format!("{}{}{}", word(), bad_char(), word()),
        _ => format!("{}{}", word(), bad_char()),
    }
}

/// Maximum-size `newfundsreq` content: base64 of 200 random bytes.
pub fn max_new_funds_content() -> String {
    random_bytes_encoded(296 - 96, ByteEncoding::Base64)
}

/// Maximum-size `recordobt` content: base64 of 288 random bytes.
pub fn max_record_obt_content() -> String {
    random_bytes_encoded(432 - 144, ByteEncoding::Base64)
}

/// A maximum-length producer URL.
pub fn max_producer_url() -> String {
    format!("http://{}.com", random_string(500))
}

/// The maximum `addaddress` list as a JSON array.
pub fn max_add_address() -> String {
    let entries: Vec<_> = (0..MAX_PUB_ADDRESSES)
        .map(|_| {
            json!({
                "token_code": random_string(10),
                "chain_code": random_string(10),
                "public_address": random_string(128),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// An `addaddress` list of `count` entries as a JSON array.
pub fn variable_add_address(count: usize) -> String {
    let entries: Vec<_> = (0..count)
        .map(|_| {
            let code = word();
            json!({
                "token_code": code,
                "chain_code": code,
                "public_address": random_bytes_encoded(32, ByteEncoding::Hex),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// The `name` of a random row from the registered-names table.
///
/// Empty, with a warning, when no row carries a name.
pub fn existing_address(rows: &[serde_json::Value]) -> String {
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("name").and_then(serde_json::Value::as_str))
        .collect();
    if names.is_empty() {
        crate::warn(format!("no registered addresses found in {NAMES_CODE}::{NAMES_TABLE}"));
        return String::new();
    }
    let pick = rand::thread_rng().gen_range(0..names.len());
    names.get(pick).map(|n| n.to_string()).unwrap_or_default()
}

/// Up to 30 producer addresses, longest first.
pub fn max_vote_producers(producers: &[ProducerInfo]) -> Vec<String> {
    let mut names: Vec<String> = producers
        .iter()
        .map(|p| p.fio_address.clone())
        .filter(|a| !a.is_empty())
        .collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()));
    if names.len() < MAX_VOTE_PRODUCERS {
        crate::warn(format!("only found {} producers", names.len()));
    }
    names.truncate(MAX_VOTE_PRODUCERS);
    names
}
