// Path: crates/cli/src/commands/key.rs

use anyhow::Result;
use clap::Parser;
use govscan_types::keys::proposal_key_hex;

#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// The proposal's category.
    pub category_id: u128,
    /// The proposal's index within the category.
    pub index: u128,
}

pub fn run(args: KeyArgs) -> Result<()> {
    println!("{}", proposal_key_hex(args.category_id, args.index)?);
    Ok(())
}
