// Path: crates/api/src/error/mod.rs
// Re-export the core error types from the central types crate.
pub use govscan_types::error::{CodecError, ErrorCode, GatewayError};
pub use govscan_types::Result;

use thiserror::Error;

/// Errors that abort a whole stale-proposal scan.
///
/// Only the reads every later step depends on can abort a scan; failures
/// on individual proposals are logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The current block height could not be decoded.
    #[error("Failed to decode block height: {0}")]
    BlockHeight(#[source] CodecError),
    /// The category count could not be decoded.
    #[error("Failed to decode category count: {0}")]
    CategoryCount(#[source] CodecError),
}

impl ErrorCode for ScanError {
    fn code(&self) -> &'static str {
        match self {
            Self::BlockHeight(_) => "SCAN_BLOCK_HEIGHT",
            Self::CategoryCount(_) => "SCAN_CATEGORY_COUNT",
        }
    }
}
