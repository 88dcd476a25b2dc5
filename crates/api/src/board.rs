// Path: crates/api/src/board.rs

//! Read models for browsing proposals: the newest proposal of every
//! category, and a single category listed newest-first.

use crate::gateway::ContractGateway;
use crate::repository::{ProposalRepository, FALLBACK_STATUS};
use govscan_types::app::ProposalRecord;
use govscan_types::codec::Value;
use govscan_types::error::CodecError;
use govscan_telemetry::sinks::metrics;
use serde_json::{json, Value as JsonValue};

/// The newest proposal of each category, split by whether voting is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    /// Height the split was computed at.
    pub block_height: u64,
    /// Proposals still open for voting, by category ascending.
    pub active: Vec<ProposalRecord>,
    /// Proposals whose voting window has closed, by category ascending.
    pub inactive: Vec<ProposalRecord>,
}

impl Overview {
    /// Renders the overview for display.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "block-height": self.block_height,
            "active": self.active.iter().map(ProposalRecord::to_json).collect::<Vec<_>>(),
            "inactive": self.inactive.iter().map(ProposalRecord::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Every proposal of one category, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    /// The listed category.
    pub category_id: u128,
    /// Height the listing was computed at.
    pub block_height: u64,
    /// The category's proposals, highest index first. Never empty.
    pub proposals: Vec<ProposalRecord>,
    /// Whether voting on the newest proposal is still open.
    pub is_active: bool,
    /// The recorded status of the newest proposal.
    pub status: u8,
}

impl CategoryListing {
    /// The proposal the listing's status and activity describe.
    pub fn newest(&self) -> Option<&ProposalRecord> {
        self.proposals.first()
    }

    /// Renders the listing for display.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "category-id": Value::UInt128(self.category_id).to_json(),
            "block-height": self.block_height,
            "is-active": self.is_active,
            "status": self.status,
            "proposals": self.proposals.iter().map(ProposalRecord::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Builds browsing views from a repository.
#[derive(Debug, Clone)]
pub struct ProposalBoard<G> {
    repo: ProposalRepository<G>,
}

/// Reads one proposal, leaving out entries that fail to decode.
async fn readable<G: ContractGateway>(
    repo: &ProposalRepository<G>,
    category_id: u128,
    index: u128,
) -> Option<ProposalRecord> {
    match repo.fetch_proposal(category_id, index).await {
        Ok(record) => record,
        Err(e) => {
            log::warn!("skipping proposal {}/{}: {}", category_id, index, e);
            metrics().inc_proposals_skipped("decode");
            None
        }
    }
}

/// A category's proposal count, or zero when it fails to decode.
async fn category_size<G: ContractGateway>(
    repo: &ProposalRepository<G>,
    category_id: u128,
) -> u128 {
    match repo.count_in_category(category_id).await {
        Ok(count) => count,
        Err(e) => {
            log::warn!("skipping category {}: {}", category_id, e);
            metrics().inc_proposals_skipped("decode");
            0
        }
    }
}

fn is_active(record: &ProposalRecord, height: u64) -> bool {
    match record.is_active_at(u128::from(height)) {
        Ok(active) => active,
        Err(e) => {
            log::warn!(
                "treating proposal {}/{} as closed: {}",
                record.category_id(),
                record.index(),
                e
            );
            false
        }
    }
}

impl<G: ContractGateway> ProposalBoard<G> {
    /// Wraps a repository.
    pub fn new(repo: ProposalRepository<G>) -> Self {
        Self { repo }
    }

    /// The repository this board reads through.
    pub fn repository(&self) -> &ProposalRepository<G> {
        &self.repo
    }

    /// The newest proposal of every category.
    ///
    /// Empty categories and categories whose newest entry is absent or
    /// undecodable are left out.
    pub async fn overview(&self) -> Result<Overview, CodecError> {
        let block_height = self.repo.block_height().await?;
        let categories = self.repo.category_count().await?;

        let mut overview = Overview {
            block_height,
            active: Vec::new(),
            inactive: Vec::new(),
        };
        for category_id in 1..=categories {
            let count = category_size(&self.repo, category_id).await;
            if count == 0 {
                continue;
            }
            let Some(newest) = readable(&self.repo, category_id, count).await else {
                continue;
            };
            if is_active(&newest, block_height) {
                overview.active.push(newest);
            } else {
                overview.inactive.push(newest);
            }
        }
        Ok(overview)
    }

    /// All proposals of `category_id`, newest first.
    ///
    /// `None` when the category holds no readable proposal. The reported
    /// status belongs to the newest proposal in the listing.
    pub async fn category(&self, category_id: u128) -> Result<Option<CategoryListing>, CodecError> {
        let block_height = self.repo.block_height().await?;
        let count = category_size(&self.repo, category_id).await;

        let mut proposals = Vec::new();
        for index in (1..=count).rev() {
            if let Some(record) = readable(&self.repo, category_id, index).await {
                proposals.push(record);
            }
        }
        let Some(newest) = proposals.first() else {
            return Ok(None);
        };

        let is_active = is_active(newest, block_height);
        let status = match self.repo.proposal_status(category_id, newest.index()).await {
            Ok(status) => status,
            Err(e) => {
                log::warn!(
                    "status of proposal {}/{} unreadable, reporting {}: {}",
                    category_id,
                    newest.index(),
                    FALLBACK_STATUS,
                    e
                );
                FALLBACK_STATUS
            }
        };
        Ok(Some(CategoryListing {
            category_id,
            block_height,
            proposals,
            is_active,
            status,
        }))
    }
}
