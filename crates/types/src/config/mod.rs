// Path: crates/types/src/config/mod.rs

//! Configuration for reaching the proposal contract and scanning it.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which network the gateway talks to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The public test network.
    #[default]
    Testnet,
    /// The public main network.
    Mainnet,
    /// A node running on the local machine.
    Devnet,
}

impl Network {
    /// The RPC endpoint used when no explicit URL is configured.
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Network::Testnet => "https://api.testnet.hiro.so",
            Network::Mainnet => "https://api.hiro.so",
            Network::Devnet => "http://localhost:20443",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Devnet => "devnet",
        })
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}

/// Where the proposal contract lives and how to talk to it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// The network to use when `rpc_url` is not set.
    #[serde(default)]
    pub network: Network,

    /// Overrides the network's default RPC endpoint.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// The address that deployed the contracts. Also used as the read-only call sender.
    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    /// The contract holding the proposal map and read-only functions.
    #[serde(default = "default_proposal_contract")]
    pub proposal_contract: String,

    /// The governance token contract, reported for display.
    #[serde(default = "default_governance_token_contract")]
    pub governance_token_contract: String,

    /// The name of the proposal map.
    #[serde(default = "default_proposal_map")]
    pub proposal_map: String,

    /// Upper bound for a single HTTP round trip.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many times a transient gateway failure is retried. 0 disables retries.
    #[serde(default)]
    pub max_retries: u32,

    /// The first retry delay; it doubles on every attempt.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Maximum in-flight reads during a scan. 1 scans sequentially.
    #[serde(default = "default_scan_concurrency")]
    pub scan_concurrency: usize,
}

fn default_contract_address() -> String {
    "ST1HTBVD3JG9C05J7HBJTHGR0GGW7KXW28M5JS8QE".to_string()
}
fn default_proposal_contract() -> String {
    "proposal-contract-v6".to_string()
}
fn default_governance_token_contract() -> String {
    "governance-token-v2".to_string()
}
fn default_proposal_map() -> String {
    crate::keys::PROPOSAL_MAP.to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_retry_backoff_ms() -> u64 {
    200
}
fn default_scan_concurrency() -> usize {
    1
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            rpc_url: None,
            contract_address: default_contract_address(),
            proposal_contract: default_proposal_contract(),
            governance_token_contract: default_governance_token_contract(),
            proposal_map: default_proposal_map(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            scan_concurrency: default_scan_concurrency(),
        }
    }
}

impl GatewayConfig {
    /// The RPC base URL, without a trailing slash.
    pub fn effective_rpc_url(&self) -> String {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
            .trim_end_matches('/')
            .to_string()
    }
}
