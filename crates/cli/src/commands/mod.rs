// Path: crates/cli/src/commands/mod.rs

pub mod category;
pub mod config;
pub mod decode;
pub mod height;
pub mod key;
pub mod overview;
pub mod proposal;
pub mod stale;
