// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Cryptonym CLI
//!
//! Builds FIO actions field by field, fills them with generated or fuzzed
//! values, and submits them in concurrent batches.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod util;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "cryptonym",
    version,
    about = "Build, fuzz and batch-submit FIO actions.",
    long_about = "Cryptonym resolves an action described field by field into a signed transaction, optionally as a multisig proposal, and submits it repeatedly from concurrent workers."
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[clap(long, global = true)]
    log_json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve an action spec and submit it in a batch.
    Send(send::SendArgs),

    /// Resolve an action spec once and print the payload.
    Preview(preview::PreviewArgs),

    /// Fetch a contract schema and print a pre-filled action spec.
    Schema(schema::SchemaArgs),

    /// Manage signing keys.
    Keys(keys::KeysArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cryptonym_telemetry::init::init_tracing(cli.log_json)?;
    cryptonym_telemetry::log::install();

    match cli.command {
        Commands::Send(args) => send::run(args).await,
        Commands::Preview(args) => preview::run(args).await,
        Commands::Schema(args) => schema::run(args).await,
        Commands::Keys(args) => keys::run(args),
    }
}
