// Path: crates/api/src/gateway/mod.rs

//! The narrow contract between the read path and a remote contract store.
//!
//! A gateway moves hex strings. It neither encodes arguments nor decodes
//! results; that is the repository's job.

use async_trait::async_trait;
use govscan_types::error::GatewayError;
use std::sync::Arc;

pub mod mock;
pub mod retry;

pub use mock::{GatewayCall, MockContractGateway};
pub use retry::RetryingGateway;

/// Issues read-only calls and map lookups against one deployed contract.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Calls a read-only function with `0x`-hex encoded arguments.
    ///
    /// Returns the `0x`-hex encoded result. A call the node ran but reported
    /// as failed is an error, as is any non-success transport status.
    async fn call_read_only(
        &self,
        function_name: &str,
        args: &[String],
    ) -> Result<String, GatewayError>;

    /// Reads the entry stored under `key_hex` in `map_name`.
    ///
    /// Returns the `0x`-hex encoded optional: the `none` sentinel when the
    /// key is absent.
    async fn get_map_entry(&self, map_name: &str, key_hex: &str) -> Result<String, GatewayError>;
}

#[async_trait]
impl<T: ContractGateway + ?Sized> ContractGateway for Arc<T> {
    async fn call_read_only(
        &self,
        function_name: &str,
        args: &[String],
    ) -> Result<String, GatewayError> {
        (**self).call_read_only(function_name, args).await
    }

    async fn get_map_entry(&self, map_name: &str, key_hex: &str) -> Result<String, GatewayError> {
        (**self).get_map_entry(map_name, key_hex).await
    }
}
