// Path: crates/cli/src/commands/preview.rs

use crate::util::{install_diagnostics, load_identity, load_toml, warn_if_restricted, FileConfig};
use anyhow::{Context, Result};
use clap::Parser;
use cryptonym_client::HttpConnection;
use cryptonym_tx::pack::assemble_json;
use cryptonym_tx::{generate_payloads, pack_and_sign, FieldSpecTable, PackOptions};
use cryptonym_types::config::ActionSpec;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Run configuration (chain, identity, batch).
    #[clap(long, short, default_value = "cryptonym.toml")]
    pub config: PathBuf,

    /// Action spec file.
    #[clap(index = 1)]
    pub action: PathBuf,

    /// Also encode and sign, and print the request that would be sent.
    #[clap(long)]
    pub sign: bool,
}

pub async fn run(args: PreviewArgs) -> Result<()> {
    let cfg: FileConfig = load_toml(&args.config)?;
    let spec: ActionSpec = load_toml(&args.action)?;
    let identity = load_identity(&cfg.identity)?;
    warn_if_restricted(&spec.contract, &spec.action);
    install_diagnostics();

    let conn = HttpConnection::new(&cfg.chain, identity.signer.clone())
        .context("Failed to create chain connection")?;
    let table = FieldSpecTable::from_action_spec(&spec)
        .with_context(|| format!("Invalid action spec {}", args.action.display()))?;
    generate_payloads(&table, &identity, &conn)
        .await
        .context("Failed to resolve payload")?;

    if !args.sign {
        let json = assemble_json(&table.snapshot()).context("Failed to assemble payload")?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let opts = PackOptions::from_batch(&cfg.batch, &cfg.chain);
    let signed = pack_and_sign(&table, &identity, &conn, &opts)
        .await
        .context("Failed to pack and sign")?;
    println!("{}", serde_json::to_string_pretty(&signed.request)?);
    Ok(())
}
