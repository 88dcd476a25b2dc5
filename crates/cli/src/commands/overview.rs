// Path: crates/cli/src/commands/overview.rs

use crate::util::{build_repository, print_json};
use anyhow::Result;
use govscan_api::board::ProposalBoard;
use govscan_types::config::GatewayConfig;

pub async fn run(config: &GatewayConfig) -> Result<()> {
    let board = ProposalBoard::new(build_repository(config)?);
    let overview = board.overview().await?;
    log::info!(
        "{} active, {} inactive at height {}",
        overview.active.len(),
        overview.inactive.len(),
        overview.block_height
    );
    print_json(&overview.to_json())
}
