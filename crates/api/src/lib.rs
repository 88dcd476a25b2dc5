// Path: crates/api/src/lib.rs

//! # govscan API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # govscan API
//!
//! The read path over a deployed proposal contract: the gateway seam to the
//! node, typed reads with fallbacks, the stale-proposal scan and the
//! browsing views built on top of them.

/// Newest-per-category and per-category browsing views.
pub mod board;
/// Re-exports the core error types and defines scan errors.
pub mod error;
/// Defines the `ContractGateway` trait and its in-process implementations.
pub mod gateway;
/// Typed reads with fallback values.
pub mod repository;
/// The stale-proposal scanner.
pub mod scanner;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::board::{CategoryListing, Overview, ProposalBoard};
    pub use crate::error::{CodecError, ErrorCode, GatewayError, ScanError};
    pub use crate::gateway::{ContractGateway, RetryingGateway};
    pub use crate::repository::ProposalRepository;
    pub use crate::scanner::StaleScanner;
}
