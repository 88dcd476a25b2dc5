// Path: crates/types/src/app/mod.rs
//! Application-level records read from the proposal contract.

mod proposal;

pub use proposal::{ProposalKey, ProposalRecord, StaleSet, STATUS_UNDECIDED};
