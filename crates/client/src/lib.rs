// Path: crates/client/src/lib.rs
//! # govscan Client Crate Lints
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
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # govscan Client
//!
//! Talks to a node's RPC endpoints on behalf of a [`govscan_api::gateway::ContractGateway`].

pub mod http;

// Re-export for convenience
pub use http::HttpContractGateway;
