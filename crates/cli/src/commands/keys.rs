// Path: crates/cli/src/commands/keys.rs

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cryptonym_api::crypto::{SerializableKey, SigningKeyPair};
use cryptonym_crypto::sign::ecdsa::Secp256k1KeyPair;
use cryptonym_crypto::sign::eddsa::Ed25519KeyPair;

#[derive(Parser, Debug)]
pub struct KeysArgs {
    #[clap(subcommand)]
    pub command: KeysCommands,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    K1,
    Ed25519,
}

impl Algorithm {
    fn as_str(self) -> &'static str {
        match self {
            Self::K1 => "k1",
            Self::Ed25519 => "ed25519",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// Generate a new identity and print it as an `[identity]` table.
    Generate {
        #[clap(long, value_enum, default_value_t = Algorithm::K1)]
        algorithm: Algorithm,
    },
    /// Show the public key and derived actor for a secret key.
    Inspect {
        /// The 32-byte secret key, hex encoded.
        seed_hex: String,
        #[clap(long, value_enum, default_value_t = Algorithm::K1)]
        algorithm: Algorithm,
    },
}

struct KeyInfo {
    seed_hex: String,
    actor: String,
    public_key: String,
    legacy_key: Option<String>,
}

fn generate(algorithm: Algorithm) -> KeyInfo {
    match algorithm {
        Algorithm::K1 => k1_info(&Secp256k1KeyPair::generate()),
        Algorithm::Ed25519 => ed25519_info(&Ed25519KeyPair::generate()),
    }
}

fn inspect(seed_hex: &str, algorithm: Algorithm) -> Result<KeyInfo> {
    Ok(match algorithm {
        Algorithm::K1 => k1_info(&Secp256k1KeyPair::from_seed_hex(seed_hex)?),
        Algorithm::Ed25519 => ed25519_info(&Ed25519KeyPair::from_seed_hex(seed_hex)?),
    })
}

fn k1_info(kp: &Secp256k1KeyPair) -> KeyInfo {
    KeyInfo {
        seed_hex: hex::encode(kp.private_key().to_bytes()),
        actor: kp.derived_actor(),
        public_key: kp.public_key_string(),
        legacy_key: Some(kp.legacy_public_key_string()),
    }
}

fn ed25519_info(kp: &Ed25519KeyPair) -> KeyInfo {
    KeyInfo {
        seed_hex: hex::encode(kp.private_key().to_bytes()),
        actor: kp.derived_actor(),
        public_key: kp.public_key_string(),
        legacy_key: None,
    }
}

pub fn run(args: KeysArgs) -> Result<()> {
    match args.command {
        KeysCommands::Generate { algorithm } => {
            let info = generate(algorithm);
            println!("[identity]");
            println!("actor = \"{}\"", info.actor);
            println!("algorithm = \"{}\"", algorithm.as_str());
            println!("seed_hex = \"{}\"", info.seed_hex);
            println!("# public key: {}", info.public_key);
            if let Some(legacy) = info.legacy_key {
                println!("# legacy key: {legacy}");
            }
        }
        KeysCommands::Inspect {
            seed_hex,
            algorithm,
        } => {
            let info = inspect(&seed_hex, algorithm)?;
            println!("Public key: {}", info.public_key);
            if let Some(legacy) = info.legacy_key {
                println!("Legacy key: {legacy}");
            }
            println!("Actor:      {}", info.actor);
        }
    }
    Ok(())
}
