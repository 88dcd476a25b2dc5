// Path: crates/cli/src/commands/height.rs

use crate::util::{build_repository, print_json};
use anyhow::Result;
use govscan_types::config::GatewayConfig;
use serde_json::json;

pub async fn run(config: &GatewayConfig) -> Result<()> {
    let repo = build_repository(config)?;
    let height = repo.block_height().await?;
    print_json(&json!({ "block-height": height }))
}
