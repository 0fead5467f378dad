// Path: crates/cli/src/commands/send.rs

use crate::util::{install_diagnostics, load_identity, load_toml, warn_if_restricted, FileConfig};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cryptonym_client::HttpConnectionFactory;
use cryptonym_tx::{BatchSupervisor, FieldSpecTable};
use cryptonym_types::chain::Compression;
use cryptonym_types::config::{ActionSpec, Repeat};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Run configuration (chain, identity, batch).
    #[clap(long, short, default_value = "cryptonym.toml")]
    pub config: PathBuf,

    /// Action spec file.
    #[clap(index = 1)]
    pub action: PathBuf,

    /// Number of concurrent workers.
    #[clap(long)]
    pub workers: Option<usize>,

    /// Total number of attempts.
    #[clap(long, conflicts_with = "forever")]
    pub count: Option<u64>,

    /// Repeat until interrupted.
    #[clap(long = "loop")]
    pub forever: bool,

    /// Pack transactions with zlib.
    #[clap(long)]
    pub zlib: bool,

    /// Print every retained outcome when the run ends.
    #[clap(long)]
    pub verbose: bool,
}

pub async fn run(args: SendArgs) -> Result<()> {
    let cfg: FileConfig = load_toml(&args.config)?;
    let spec: ActionSpec = load_toml(&args.action)?;
    let identity = load_identity(&cfg.identity)?;

    let mut batch = cfg.batch;
    if let Some(n) = args.workers {
        batch.workers = n;
    }
    if let Some(n) = args.count {
        batch.repeat = Repeat::Count(n);
    }
    if args.forever {
        batch.repeat = Repeat::Loop;
    }
    if args.zlib {
        batch.compression = Compression::Zlib;
    }

    warn_if_restricted(&spec.contract, &spec.action);
    install_diagnostics();

    let table = Arc::new(
        FieldSpecTable::from_action_spec(&spec)
            .with_context(|| format!("Invalid action spec {}", args.action.display()))?,
    );
    let factory = Arc::new(HttpConnectionFactory::new(
        cfg.chain.clone(),
        identity.signer.clone(),
    ));
    let supervisor = BatchSupervisor::new(table, identity, factory, cfg.chain);

    println!("Sending {}::{} with {} worker(s)", spec.contract, spec.action, batch.workers);
    supervisor
        .start(&batch)
        .await
        .map_err(|e| anyhow!("Failed to start batch: {e}"))?;

    tokio::select! {
        _ = supervisor.wait() => {}
        _ = tokio::signal::ctrl_c() => {
            println!("Interrupted, waiting for in-flight attempts...");
            supervisor.stop().await;
        }
    }

    if args.verbose {
        let mut history = supervisor.history();
        history.sort_by_key(|o| o.index);
        for outcome in &history {
            let mark = if outcome.success { "ok " } else { "err" };
            println!("{mark} #{:<6} {}", outcome.index, outcome.summary);
        }
    }
    println!(
        "Done: {} succeeded, {} failed",
        supervisor.succeeded(),
        supervisor.failed()
    );
    Ok(())
}
