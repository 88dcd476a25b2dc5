// Path: crates/cli/src/commands/category.rs

use super::stale;
use crate::util::{build_repository, print_json};
use anyhow::Result;
use clap::Parser;
use govscan_api::board::ProposalBoard;
use govscan_types::config::GatewayConfig;
use serde_json::{json, Value as JsonValue};

#[derive(Parser, Debug)]
pub struct CategoryArgs {
    /// The category to list.
    pub category_id: u128,
}

pub async fn run(args: CategoryArgs, config: &GatewayConfig) -> Result<()> {
    let repo = build_repository(config)?;
    let board = ProposalBoard::new(repo.clone());
    let listing = board.category(args.category_id).await?;
    if listing.is_none() {
        log::warn!("category {} has no proposals", args.category_id);
    }

    let stale = stale::scan(repo, config).await?;
    print_json(&json!({
        "category": listing.map(|l| l.to_json()).unwrap_or(JsonValue::Null),
        "stale": stale::to_json(&stale)?,
    }))
}
