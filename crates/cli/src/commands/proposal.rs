// Path: crates/cli/src/commands/proposal.rs

use crate::util::{build_repository, print_json};
use anyhow::{anyhow, Result};
use clap::Parser;
use govscan_types::config::GatewayConfig;

#[derive(Parser, Debug)]
pub struct ProposalArgs {
    /// The proposal's category.
    pub category_id: u128,
    /// The proposal's index within the category.
    pub index: u128,
}

pub async fn run(args: ProposalArgs, config: &GatewayConfig) -> Result<()> {
    let repo = build_repository(config)?;
    let height = repo.block_height().await?;
    let record = repo
        .fetch_proposal(args.category_id, args.index)
        .await?
        .ok_or_else(|| anyhow!("No proposal at {}/{}", args.category_id, args.index))?;
    let status = repo.proposal_status(args.category_id, args.index).await?;

    let mut out = record.to_json();
    if let Some(map) = out.as_object_mut() {
        map.insert("status".into(), status.into());
        map.insert(
            "is-active".into(),
            record.is_active_at(u128::from(height))?.into(),
        );
    }
    print_json(&out)
}
