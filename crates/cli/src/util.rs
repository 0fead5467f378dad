// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use cryptonym_api::diagnostics::{Diagnostics, DEFAULT_CAPACITY};
use cryptonym_api::identity::SignerIdentity;
use cryptonym_api::crypto::DigestSigner;
use cryptonym_crypto::sign::ecdsa::Secp256k1KeyPair;
use cryptonym_crypto::sign::eddsa::Ed25519KeyPair;
use cryptonym_types::catalog;
use cryptonym_types::config::{BatchConfig, ChainConfig, IdentityConfig, KeyAlgorithm};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// The `cryptonym.toml` run configuration.
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    pub chain: ChainConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_identity(cfg: &IdentityConfig) -> Result<SignerIdentity> {
    let (derived, signer): (String, Arc<dyn DigestSigner>) = match cfg.algorithm {
        KeyAlgorithm::K1 => {
            let key = Secp256k1KeyPair::from_seed_hex(&cfg.seed_hex)
                .context("Invalid secp256k1 identity key")?;
            (key.derived_actor(), Arc::new(key))
        }
        KeyAlgorithm::Ed25519 => {
            let key =
                Ed25519KeyPair::from_seed_hex(&cfg.seed_hex).context("Invalid Ed25519 identity seed")?;
            (key.derived_actor(), Arc::new(key))
        }
    };
    let actor = cfg.actor.clone().unwrap_or(derived);
    Ok(SignerIdentity::new(actor, signer))
}

/// Routes generator diagnostics to stderr for the life of the process.
pub fn install_diagnostics() {
    let (diagnostics, mut rx) = Diagnostics::channel(DEFAULT_CAPACITY);
    if diagnostics.install_global() {
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                eprintln!("  ! {msg}");
            }
        });
    }
}

pub fn warn_if_restricted(contract: &str, action: &str) {
    if catalog::is_privileged(contract, action) {
        tracing::warn!(
            target: "cli",
            "{contract}::{action} requires a privileged account and will likely be rejected"
        );
    }
    if catalog::is_producer_only(contract, action) {
        tracing::warn!(
            target: "cli",
            "{contract}::{action} can only be sent by a registered producer"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    #[test]
    fn file_config_parses_with_default_batch() {
        let cfg: FileConfig = toml::from_str(&format!(
            "[chain]\nurl = \"http://127.0.0.1:8888\"\n\n[identity]\nseed_hex = \"{SEED}\"\n"
        ))
        .unwrap();
        assert_eq!(cfg.batch.workers, 1);
        assert_eq!(cfg.chain.timeout_ms, 5_000);
    }

    #[test]
    fn identity_actor_defaults_to_the_derived_name() {
        let id = |actor: Option<&str>, algorithm, seed: &str| IdentityConfig {
            actor: actor.map(str::to_string),
            algorithm,
            seed_hex: seed.into(),
        };
        let derived = load_identity(&id(None, KeyAlgorithm::K1, SEED)).unwrap();
        let key = Secp256k1KeyPair::from_seed_hex(SEED).unwrap();
        assert_eq!(derived.actor, key.derived_actor());
        assert_eq!(derived.public_key, key.public_key_string());
        assert!(derived.public_key.starts_with("PUB_K1_"));

        let ed = load_identity(&id(None, KeyAlgorithm::Ed25519, SEED)).unwrap();
        let ed_key = Ed25519KeyPair::from_seed_hex(SEED).unwrap();
        assert_eq!(ed.actor, ed_key.derived_actor());
        assert!(ed.public_key.starts_with("PUB_ED_"));

        let named = load_identity(&id(Some("alice"), KeyAlgorithm::K1, SEED)).unwrap();
        assert_eq!(named.actor, "alice");
        assert!(load_identity(&id(None, KeyAlgorithm::K1, "zz")).is_err());
        assert!(load_identity(&id(None, KeyAlgorithm::K1, &"00".repeat(32))).is_err());
    }
}
