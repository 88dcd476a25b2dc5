// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # govscan Types
//!
//! The foundational library for govscan: the binary value codec, the
//! proposal records built on it, error types and configuration.
//!
//! ## Architectural Role
//!
//! As the base crate, `govscan-types` has no dependency on any other crate
//! in the workspace and performs no I/O. Everything that talks to a node
//! lives in `govscan-api` and `govscan-client`.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::CodecError> = std::result::Result<T, E>;

/// Proposal records, keys and the stale-set artifact.
pub mod app;
/// The tagged binary value format and its canonical codec.
pub mod codec;
/// Gateway and scan configuration.
pub mod config;
/// Error types shared across the workspace.
pub mod error;
/// Contract function and map names, and the proposal key builder.
pub mod keys;
