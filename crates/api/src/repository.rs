// Path: crates/api/src/repository.rs

//! Typed reads over a [`ContractGateway`].
//!
//! Every read has a fallback. When the gateway fails, or the contract answers
//! with `(err ..)` or `none`, the fallback is returned and the failure is
//! logged. Results that arrive but cannot be decoded are errors.

use crate::gateway::ContractGateway;
use govscan_telemetry::sinks::metrics;
use govscan_types::app::{ProposalKey, ProposalRecord, STATUS_UNDECIDED};
use govscan_types::codec::{decode_hex, Value};
use govscan_types::error::{CodecError, ErrorCode, GatewayError};
use govscan_types::keys::{
    uint_arg_hex, FN_GET_BLOCK_HEIGHT, FN_GET_CATEGORY_COUNT, FN_GET_COUNT_IN_CATEGORY,
    FN_GET_PROPOSAL_STATUS, PROPOSAL_MAP,
};

/// Block height reported when the node cannot be reached.
pub const FALLBACK_BLOCK_HEIGHT: u64 = 0;
/// Category and per-category counts reported when the node cannot be reached.
pub const FALLBACK_COUNT: u128 = 0;
/// Status reported when the node cannot be reached.
pub const FALLBACK_STATUS: u8 = STATUS_UNDECIDED;

/// Reads proposal state through a gateway.
#[derive(Debug, Clone)]
pub struct ProposalRepository<G> {
    gateway: G,
    proposal_map: String,
}

/// Strips `(ok ..)` and `(some ..)` wrappers. `None` means the contract
/// reported no value: an `(err ..)` response or `none`.
fn peel(value: Value) -> Option<Value> {
    match value {
        Value::Response { ok: true, inner } => peel(*inner),
        Value::Optional(Some(inner)) => peel(*inner),
        Value::Response { ok: false, .. } | Value::Optional(None) => None,
        other => Some(other),
    }
}

fn report(operation: &str, error: &GatewayError) {
    log::warn!("gateway {} failed, using fallback: {}", operation, error);
    metrics().inc_error("gateway", error.code());
}

impl<G: ContractGateway> ProposalRepository<G> {
    /// Reads from the default `proposals` map.
    pub fn new(gateway: G) -> Self {
        Self::with_map(gateway, PROPOSAL_MAP)
    }

    /// Reads proposals from `proposal_map` instead of the default map.
    pub fn with_map(gateway: G, proposal_map: impl Into<String>) -> Self {
        Self {
            gateway,
            proposal_map: proposal_map.into(),
        }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Calls `function` and peels the result. `Ok(None)` means fall back.
    async fn read(&self, function: &str, args: &[String]) -> Result<Option<Value>, CodecError> {
        let hex = match self.gateway.call_read_only(function, args).await {
            Ok(hex) => hex,
            Err(e) => {
                report(function, &e);
                return Ok(None);
            }
        };
        let value = decode_hex(&hex)?;
        let peeled = peel(value);
        if peeled.is_none() {
            log::warn!("{} returned no value, using fallback", function);
        }
        Ok(peeled)
    }

    async fn read_uint(&self, function: &str, args: &[String]) -> Result<Option<u128>, CodecError> {
        self.read(function, args)
            .await?
            .map(|v| v.expect_u128())
            .transpose()
    }

    /// The current chain height, or [`FALLBACK_BLOCK_HEIGHT`].
    pub async fn block_height(&self) -> Result<u64, CodecError> {
        match self.read_uint(FN_GET_BLOCK_HEIGHT, &[]).await? {
            Some(h) => u64::try_from(h).map_err(|_| CodecError::IntegerOverflow { target: "u64" }),
            None => Ok(FALLBACK_BLOCK_HEIGHT),
        }
    }

    /// How many categories exist, or [`FALLBACK_COUNT`].
    pub async fn category_count(&self) -> Result<u128, CodecError> {
        Ok(self
            .read_uint(FN_GET_CATEGORY_COUNT, &[])
            .await?
            .unwrap_or(FALLBACK_COUNT))
    }

    /// How many proposals `category_id` holds, or [`FALLBACK_COUNT`].
    pub async fn count_in_category(&self, category_id: u128) -> Result<u128, CodecError> {
        Ok(self
            .read_uint(FN_GET_COUNT_IN_CATEGORY, &[uint_arg_hex(category_id)])
            .await?
            .unwrap_or(FALLBACK_COUNT))
    }

    /// The recorded status of a proposal, or [`FALLBACK_STATUS`].
    pub async fn proposal_status(&self, category_id: u128, index: u128) -> Result<u8, CodecError> {
        let args = [uint_arg_hex(category_id), uint_arg_hex(index)];
        match self.read_uint(FN_GET_PROPOSAL_STATUS, &args).await? {
            Some(s) => u8::try_from(s).map_err(|_| CodecError::IntegerOverflow { target: "u8" }),
            None => Ok(FALLBACK_STATUS),
        }
    }

    /// The proposal stored at `(category_id, index)`.
    ///
    /// `None` when the key is absent or the gateway failed.
    pub async fn fetch_proposal(
        &self,
        category_id: u128,
        index: u128,
    ) -> Result<Option<ProposalRecord>, CodecError> {
        let key = ProposalKey::new(category_id, index);
        let hex = match self
            .gateway
            .get_map_entry(&self.proposal_map, &key.map_key_hex()?)
            .await
        {
            Ok(hex) => hex,
            Err(e) => {
                report(&self.proposal_map, &e);
                return Ok(None);
            }
        };
        match peel(decode_hex(&hex)?) {
            Some(value) => ProposalRecord::from_value(key, value).map(Some),
            None => Ok(None),
        }
    }
}
