// Path: crates/cli/src/commands/stale.rs

use crate::util::{build_repository, print_json, SharedGateway};
use anyhow::Result;
use clap::Parser;
use govscan_api::repository::ProposalRepository;
use govscan_api::scanner::StaleScanner;
use govscan_types::app::{ProposalKey, StaleSet};
use govscan_types::config::GatewayConfig;
use serde_json::{json, Value as JsonValue};

#[derive(Parser, Debug)]
pub struct StaleArgs {
    /// Print the keys as JSON next to the encoded list.
    #[clap(long)]
    pub json: bool,
}

/// Runs a scan with the configured concurrency.
pub async fn scan(
    repo: ProposalRepository<SharedGateway>,
    config: &GatewayConfig,
) -> Result<StaleSet> {
    let scanner = StaleScanner::new(repo).with_concurrency(config.scan_concurrency);
    Ok(scanner.find_stale_proposals().await?)
}

/// The stale set as display JSON: the keys plus the encoded artifact.
pub fn to_json(stale: &StaleSet) -> Result<JsonValue> {
    let keys: Vec<JsonValue> = stale
        .entries()
        .iter()
        .map(|key| ProposalKey::to_value(key).to_json())
        .collect();
    Ok(json!({ "stale": keys, "hex": stale.to_hex()? }))
}

pub async fn run(args: StaleArgs, config: &GatewayConfig) -> Result<()> {
    let stale = scan(build_repository(config)?, config).await?;
    if args.json {
        print_json(&to_json(&stale)?)
    } else {
        println!("{}", stale.to_hex()?);
        Ok(())
    }
}
