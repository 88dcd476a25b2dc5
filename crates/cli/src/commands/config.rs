// Path: crates/cli/src/commands/config.rs

use anyhow::Result;
use govscan_types::config::GatewayConfig;

/// The configuration as TOML, with the RPC URL resolved.
pub fn render(config: &GatewayConfig) -> Result<String> {
    let effective = GatewayConfig {
        rpc_url: Some(config.effective_rpc_url()),
        ..config.clone()
    };
    Ok(toml::to_string_pretty(&effective)?)
}

pub fn run(config: &GatewayConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_round_trips() {
        let text = render(&GatewayConfig::default()).unwrap();
        assert!(text.contains("rpc_url = \"https://api.testnet.hiro.so\""));
        assert!(text.contains("network = \"testnet\""));

        let parsed: GatewayConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.proposal_contract, "proposal-contract-v6");
        assert_eq!(parsed.governance_token_contract, "governance-token-v2");
    }
}
