// Path: crates/api/src/scanner.rs

//! Finds proposals whose voting window has closed without a final status.

use crate::error::ScanError;
use crate::gateway::ContractGateway;
use crate::repository::ProposalRepository;
use futures_util::stream::{self, StreamExt};
use govscan_telemetry::sinks::metrics;
use govscan_telemetry::time::{Timer, TimerTarget};
use govscan_types::app::{ProposalKey, StaleSet, STATUS_UNDECIDED};

/// Walks every category and index and collects stale proposals.
///
/// With a concurrency of 1 the walk is strictly sequential. Higher values
/// keep up to that many reads in flight while preserving the sequential
/// output order.
#[derive(Debug, Clone)]
pub struct StaleScanner<G> {
    repo: ProposalRepository<G>,
    concurrency: usize,
}

impl<G: ContractGateway> StaleScanner<G> {
    /// A sequential scanner.
    pub fn new(repo: ProposalRepository<G>) -> Self {
        Self {
            repo,
            concurrency: 1,
        }
    }

    /// Sets how many reads may be in flight at once. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The repository this scanner reads through.
    pub fn repository(&self) -> &ProposalRepository<G> {
        &self.repo
    }

    /// Collects every proposal with `end-block <= height` whose status is undecided.
    ///
    /// Entries come out ordered by category, then index. Only an undecodable
    /// block height or category count aborts the scan.
    pub async fn find_stale_proposals(&self) -> Result<StaleSet, ScanError> {
        let _timer = Timer::new(metrics(), TimerTarget::Scan);

        let height = self
            .repo
            .block_height()
            .await
            .map_err(ScanError::BlockHeight)?;
        let categories = self
            .repo
            .category_count()
            .await
            .map_err(ScanError::CategoryCount)?;
        if categories == 0 {
            log::info!("no categories at height {}", height);
            return Ok(StaleSet::new());
        }

        let height = u128::from(height);
        let stale = if self.concurrency > 1 {
            self.scan_buffered(height, categories).await
        } else {
            self.scan_sequential(height, categories).await
        };

        metrics().inc_stale_found(stale.len() as u64);
        log::info!(
            "scan at height {} over {} categories found {} stale proposals",
            height,
            categories,
            stale.len()
        );
        Ok(stale)
    }

    async fn scan_sequential(&self, height: u128, categories: u128) -> StaleSet {
        let mut stale = StaleSet::new();
        for category_id in 1..=categories {
            let count = self.category_size(category_id).await;
            for index in 1..=count {
                if let Some(key) = self.check(height, ProposalKey::new(category_id, index)).await {
                    stale.push(key);
                }
            }
        }
        stale
    }

    async fn scan_buffered(&self, height: u128, categories: u128) -> StaleSet {
        let limit = self.concurrency;
        let sizes: Vec<(u128, u128)> = stream::iter(1..=categories)
            .map(|category_id| async move { (category_id, self.category_size(category_id).await) })
            .buffered(limit)
            .collect()
            .await;

        let keys = sizes.into_iter().flat_map(|(category_id, count)| {
            (1..=count).map(move |index| ProposalKey::new(category_id, index))
        });
        let found: Vec<Option<ProposalKey>> = stream::iter(keys)
            .map(|key| self.check(height, key))
            .buffered(limit)
            .collect()
            .await;
        found.into_iter().flatten().collect()
    }

    /// The number of indices to visit in a category. Undecodable counts skip the category.
    async fn category_size(&self, category_id: u128) -> u128 {
        match self.repo.count_in_category(category_id).await {
            Ok(count) => count,
            Err(e) => {
                log::warn!("skipping category {}: {}", category_id, e);
                metrics().inc_proposals_skipped("decode");
                0
            }
        }
    }

    /// Returns `key` if the proposal there is stale at `height`.
    async fn check(&self, height: u128, key: ProposalKey) -> Option<ProposalKey> {
        let record = match self.repo.fetch_proposal(key.category_id, key.index).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::debug!("no proposal at {}/{}", key.category_id, key.index);
                metrics().inc_proposals_skipped("absent");
                return None;
            }
            Err(e) => {
                log::warn!("skipping proposal {}/{}: {}", key.category_id, key.index, e);
                metrics().inc_proposals_skipped("decode");
                return None;
            }
        };
        metrics().inc_proposals_visited(1);

        let end_block = match record.end_block() {
            Ok(end_block) => end_block,
            Err(e) => {
                log::warn!("skipping proposal {}/{}: {}", key.category_id, key.index, e);
                metrics().inc_proposals_skipped("decode");
                return None;
            }
        };
        if end_block > height {
            return None;
        }

        match self.repo.proposal_status(key.category_id, key.index).await {
            Ok(STATUS_UNDECIDED) => Some(key),
            Ok(_) => None,
            Err(e) => {
                log::warn!(
                    "skipping status of {}/{}: {}",
                    key.category_id,
                    key.index,
                    e
                );
                metrics().inc_proposals_skipped("decode");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayCall, MockContractGateway};
    use govscan_types::codec::Value;
    use govscan_types::error::{CodecError, GatewayError};
    use govscan_types::keys::{
        proposal_key_hex, uint_arg_hex, FN_GET_BLOCK_HEIGHT, FN_GET_CATEGORY_COUNT,
        FN_GET_PROPOSAL_STATUS,
    };
    use std::sync::Arc;

    fn proposal(end_block: u128) -> Value {
        Value::tuple([
            ("proposer", Value::StandardPrincipal([7; 21])),
            ("end-block", Value::UInt128(end_block)),
        ])
        .unwrap()
    }

    fn scanner(gw: MockContractGateway) -> StaleScanner<Arc<MockContractGateway>> {
        StaleScanner::new(ProposalRepository::new(Arc::new(gw)))
    }

    fn status_queries(gw: &MockContractGateway) -> Vec<Vec<String>> {
        gw.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::ReadOnly { function, args } if function == FN_GET_PROPOSAL_STATUS => {
                    Some(args)
                }
                _ => None,
            })
            .collect()
    }

    /// Two categories with one proposal each; only category 2 has closed.
    fn two_categories() -> MockContractGateway {
        MockContractGateway::new()
            .with_block_height(80)
            .with_category_count(2)
            .with_count_in_category(1, 1)
            .with_count_in_category(2, 1)
            .with_proposal(1, 1, proposal(100))
            .with_proposal(2, 1, proposal(50))
            .with_status(2, 1, STATUS_UNDECIDED)
    }

    #[tokio::test]
    async fn test_open_proposals_are_never_status_queried() {
        let scanner = scanner(two_categories());
        let stale = scanner.find_stale_proposals().await.unwrap();
        assert_eq!(stale.entries(), &[ProposalKey::new(2, 1)]);

        let gw = scanner.repository().gateway();
        assert_eq!(
            status_queries(gw),
            vec![vec![uint_arg_hex(2), uint_arg_hex(1)]]
        );
        assert_eq!(gw.read_only_count(FN_GET_PROPOSAL_STATUS), 1);
        assert!(stale.to_hex().unwrap().starts_with("0x0b00000001"));
    }

    #[tokio::test]
    async fn test_hole_does_not_stop_the_walk() {
        let gw = MockContractGateway::new()
            .with_block_height(10)
            .with_category_count(1)
            .with_count_in_category(1, 3)
            .with_proposal(1, 1, proposal(5))
            .with_proposal(1, 3, proposal(5))
            .with_status(1, 1, STATUS_UNDECIDED)
            .with_status(1, 3, STATUS_UNDECIDED);
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert_eq!(
            stale.entries(),
            &[ProposalKey::new(1, 1), ProposalKey::new(1, 3)]
        );
    }

    #[tokio::test]
    async fn test_zero_categories_yield_empty_set() {
        let gw = MockContractGateway::new()
            .with_block_height(10)
            .with_category_count(0);
        let scanner = scanner(gw);
        let stale = scanner.find_stale_proposals().await.unwrap();
        assert!(stale.is_empty());
        assert_eq!(stale.to_hex().unwrap(), "0x0b00000000");
        assert_eq!(scanner.repository().gateway().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_node_yields_empty_set() {
        let stale = scanner(MockContractGateway::new())
            .find_stale_proposals()
            .await
            .unwrap();
        assert!(stale.is_empty());
    }

    #[tokio::test]
    async fn test_end_block_equal_to_height_is_a_candidate() {
        let gw = MockContractGateway::new()
            .with_block_height(50)
            .with_category_count(1)
            .with_count_in_category(1, 2)
            .with_proposal(1, 1, proposal(50))
            .with_proposal(1, 2, proposal(51))
            .with_status(1, 1, STATUS_UNDECIDED);
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert_eq!(stale.entries(), &[ProposalKey::new(1, 1)]);
    }

    #[tokio::test]
    async fn test_decided_proposals_are_excluded() {
        let gw = MockContractGateway::new()
            .with_block_height(90)
            .with_category_count(1)
            .with_count_in_category(1, 2)
            .with_proposal(1, 1, proposal(10))
            .with_proposal(1, 2, proposal(20))
            .with_status(1, 1, 1)
            .with_status(1, 2, STATUS_UNDECIDED);
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert_eq!(stale.entries(), &[ProposalKey::new(1, 2)]);
    }

    #[tokio::test]
    async fn test_status_lookup_failure_counts_as_undecided() {
        let gw = MockContractGateway::new()
            .with_block_height(90)
            .with_category_count(1)
            .with_count_in_category(1, 1)
            .with_proposal(1, 1, proposal(10));
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert_eq!(stale.entries(), &[ProposalKey::new(1, 1)]);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_skipped() {
        let gw = MockContractGateway::new()
            .with_block_height(90)
            .with_category_count(1)
            .with_count_in_category(1, 3)
            .with_proposal(1, 1, proposal(10))
            .with_proposal(1, 3, proposal(10))
            .with_status(1, 1, STATUS_UNDECIDED)
            .with_status(1, 3, STATUS_UNDECIDED);
        gw.respond_map_entry(&proposal_key_hex(1, 2).unwrap(), Ok("0x0aff".into()));
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert_eq!(
            stale.entries(),
            &[ProposalKey::new(1, 1), ProposalKey::new(1, 3)]
        );
    }

    #[tokio::test]
    async fn test_entry_without_end_block_is_skipped() {
        let no_end = Value::tuple([("title", Value::StringUtf8("x".into()))]).unwrap();
        let gw = MockContractGateway::new()
            .with_block_height(90)
            .with_category_count(1)
            .with_count_in_category(1, 1)
            .with_proposal(1, 1, no_end);
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert!(stale.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_is_skipped() {
        let gw = two_categories().failing_proposal(
            2,
            1,
            GatewayError::Status {
                status: 502,
                body: String::new(),
            },
        );
        let stale = scanner(gw).find_stale_proposals().await.unwrap();
        assert!(stale.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_height_aborts() {
        let gw = MockContractGateway::new();
        gw.respond_read_only(FN_GET_BLOCK_HEIGHT, &[], Ok("0x0e".into()));
        let err = scanner(gw).find_stale_proposals().await.unwrap_err();
        assert!(matches!(
            err,
            ScanError::BlockHeight(CodecError::TruncatedInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_category_count_aborts() {
        let gw = MockContractGateway::new().with_block_height(5);
        gw.respond_read_only(FN_GET_CATEGORY_COUNT, &[], Ok("0xff".into()));
        let err = scanner(gw).find_stale_proposals().await.unwrap_err();
        assert_eq!(err, ScanError::CategoryCount(CodecError::UnsupportedTag(0xff)));
    }

    #[tokio::test]
    async fn test_concurrent_scan_matches_sequential() {
        let build = || {
            let mut gw = MockContractGateway::new()
                .with_block_height(100)
                .with_category_count(3);
            for category_id in 1..=3u128 {
                gw = gw.with_count_in_category(category_id, 4);
                for index in 1..=4u128 {
                    if (category_id + index) % 3 == 0 {
                        continue;
                    }
                    let end = if index % 2 == 0 { 90 } else { 150 };
                    gw = gw
                        .with_proposal(category_id, index, proposal(end))
                        .with_status(category_id, index, STATUS_UNDECIDED);
                }
            }
            gw
        };

        let sequential = scanner(build()).find_stale_proposals().await.unwrap();
        let concurrent = scanner(build())
            .with_concurrency(4)
            .find_stale_proposals()
            .await
            .unwrap();
        assert!(!sequential.is_empty());
        assert_eq!(sequential, concurrent);
        assert!(sequential.entries().windows(2).all(|w| w[0] < w[1]));
    }
}
