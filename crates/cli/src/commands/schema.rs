// Path: crates/cli/src/commands/schema.rs

use crate::util::{load_identity, load_toml, FileConfig};
use anyhow::{Context, Result};
use clap::Parser;
use cryptonym_api::chain::SchemaSource;
use cryptonym_client::HttpChainClient;
use cryptonym_tx::defaults::table_from_schema;
use cryptonym_types::config::{ActionSpec, FieldSpecConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Run configuration (chain, identity, batch).
    #[clap(long, short, default_value = "cryptonym.toml")]
    pub config: PathBuf,

    /// The contract account.
    #[clap(index = 1)]
    pub contract: String,

    /// The action; lists the contract's actions when omitted.
    #[clap(index = 2)]
    pub action: Option<String>,
}

pub async fn run(args: SchemaArgs) -> Result<()> {
    let cfg: FileConfig = load_toml(&args.config)?;
    let rpc = HttpChainClient::new(&cfg.chain).context("Failed to create chain client")?;
    let abi = rpc
        .fetch_schema(&args.contract)
        .await
        .with_context(|| format!("Failed to fetch schema for {}", args.contract))?;

    let Some(action) = args.action else {
        for a in &abi.actions {
            println!("{}", a.name);
        }
        return Ok(());
    };

    let identity = load_identity(&cfg.identity)?;
    let table = table_from_schema(&abi, &args.contract, &action, &identity)
        .with_context(|| format!("Cannot build {}::{action}", args.contract))?;
    let spec = ActionSpec {
        contract: args.contract,
        action,
        fields: table
            .snapshot()
            .into_iter()
            .map(|f| FieldSpecConfig {
                length: f.length.map(|l| l.to_string()),
                mode: f.mode.mode_label().to_string(),
                variant: f.mode.variant_label().to_string(),
                input: f.raw_input,
                declared_type: f.declared_type,
                name: f.name,
            })
            .collect(),
    };
    print!("{}", toml::to_string_pretty(&spec)?);
    Ok(())
}
