// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use clap::Args;
use govscan_api::gateway::{ContractGateway, RetryingGateway};
use govscan_api::repository::ProposalRepository;
use govscan_client::HttpContractGateway;
use govscan_types::config::{GatewayConfig, Network};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// The gateway every command reads through.
pub type SharedGateway = Arc<dyn ContractGateway>;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a TOML configuration file.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Network whose default RPC endpoint to use.
    #[clap(long, global = true)]
    pub network: Option<Network>,

    /// Explicit RPC endpoint; wins over --network.
    #[clap(long, global = true)]
    pub rpc_url: Option<String>,

    /// Emit logs as JSON through tracing instead of env_logger.
    #[clap(long, global = true)]
    pub log_json: bool,

    /// Collect Prometheus metrics and print them to stderr on exit.
    #[clap(long, global = true)]
    pub metrics: bool,
}

/// Loads the config file, if any, then applies command-line overrides.
pub fn load_config(args: &GlobalArgs) -> Result<GatewayConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => GatewayConfig::default(),
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut GatewayConfig, args: &GlobalArgs) {
    if let Some(network) = args.network {
        config.network = network;
        // A network chosen on the command line replaces a URL from the file.
        if args.rpc_url.is_none() {
            config.rpc_url = None;
        }
    }
    if let Some(url) = &args.rpc_url {
        config.rpc_url = Some(url.clone());
    }
}

/// The HTTP gateway, wrapped in retries when the config asks for them.
pub fn build_gateway(config: &GatewayConfig) -> Result<SharedGateway> {
    let http = HttpContractGateway::new(config).context("Failed to build HTTP client")?;
    log::debug!(
        "reading {}.{} via {}",
        config.contract_address,
        config.proposal_contract,
        http.base_url()
    );
    if config.max_retries > 0 {
        Ok(Arc::new(RetryingGateway::new(
            http,
            config.max_retries,
            Duration::from_millis(config.retry_backoff_ms),
        )))
    } else {
        Ok(Arc::new(http))
    }
}

/// A repository over [`build_gateway`] reading the configured map.
pub fn build_repository(config: &GatewayConfig) -> Result<ProposalRepository<SharedGateway>> {
    Ok(ProposalRepository::with_map(
        build_gateway(config)?,
        &config.proposal_map,
    ))
}

pub fn print_json(value: &JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
