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

//! # govscan CLI
//!
//! Reads a deployed proposal contract: block height, proposal listings,
//! single proposals and the set of stale proposals.

use anyhow::Result;
use clap::{Parser, Subcommand};

// Import command modules
mod commands;
mod util;

use commands::*;
use util::GlobalArgs;

#[derive(Parser, Debug)]
#[clap(
    name = "govscan",
    version,
    about = "Inspect proposals stored in an on-chain governance contract.",
    long_about = "govscan reads proposal state through a node's read-only RPC endpoints and finds proposals whose voting window has closed without a final status."
)]
struct Cli {
    #[clap(flatten)]
    global: GlobalArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // --- Chain ---
    /// Print the current block height.
    Height,

    // --- Proposals ---
    /// Newest proposal of every category, split into active and inactive.
    Overview,

    /// All proposals of one category, newest first, plus the stale set.
    Category(category::CategoryArgs),

    /// One proposal with its status.
    Proposal(proposal::ProposalArgs),

    /// Scan for proposals that closed without a final status.
    Stale(stale::StaleArgs),

    // --- Tools ---
    /// Decode a hex wire value to JSON.
    Decode(decode::DecodeArgs),

    /// Print the proposal map key for a category and index.
    Key(key::KeyArgs),

    /// Print the effective configuration as TOML.
    Config,
}

fn init_logging(json: bool) -> Result<()> {
    if json {
        govscan_telemetry::init::init_tracing("info")?;
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.log_json)?;
    if cli.global.metrics {
        govscan_telemetry::prometheus::install()?;
    }
    let config = util::load_config(&cli.global)?;

    let result = match cli.command {
        // --- Chain ---
        Commands::Height => height::run(&config).await,

        // --- Proposals ---
        Commands::Overview => overview::run(&config).await,
        Commands::Category(args) => category::run(args, &config).await,
        Commands::Proposal(args) => proposal::run(args, &config).await,
        Commands::Stale(args) => stale::run(args, &config).await,

        // --- Tools ---
        Commands::Decode(args) => decode::run(args),
        Commands::Key(args) => key::run(args),
        Commands::Config => config::run(&config),
    };

    if cli.global.metrics {
        eprint!("{}", govscan_telemetry::prometheus::gather_text()?);
    }
    result
}
