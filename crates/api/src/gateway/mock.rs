// Path: crates/api/src/gateway/mock.rs

use super::ContractGateway;
use async_trait::async_trait;
use dashmap::DashMap;
use govscan_types::codec::{encode_hex, Value};
use govscan_types::error::GatewayError;
use govscan_types::keys::{
    proposal_key_hex, uint_arg_hex, FN_GET_BLOCK_HEIGHT, FN_GET_CATEGORY_COUNT,
    FN_GET_COUNT_IN_CATEGORY, FN_GET_PROPOSAL_STATUS, PROPOSAL_MAP,
};
use std::sync::Mutex;

/// One request seen by [`MockContractGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// A read-only function call.
    ReadOnly {
        /// The function name.
        function: String,
        /// The hex arguments, in order.
        args: Vec<String>,
    },
    /// A map lookup.
    MapEntry {
        /// The map name.
        map: String,
        /// The hex key.
        key_hex: String,
    },
}

/// An in-memory contract store with scripted responses.
///
/// Read-only calls without a scripted response fail with HTTP 404; map
/// lookups without one return the `none` sentinel, as a node does for an
/// absent key. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockContractGateway {
    read_only: DashMap<(String, Vec<String>), Result<String, GatewayError>>,
    map_entries: DashMap<(String, String), Result<String, GatewayError>>,
    calls: Mutex<Vec<GatewayCall>>,
}

fn encoded(value: &Value) -> Result<String, GatewayError> {
    encode_hex(value).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

fn proposal_key(category_id: u128, index: u128) -> String {
    proposal_key_hex(category_id, index).unwrap_or_default()
}

impl MockContractGateway {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the raw response for a read-only call.
    pub fn respond_read_only(
        &self,
        function: &str,
        args: &[String],
        result: Result<String, GatewayError>,
    ) {
        self.read_only
            .insert((function.to_string(), args.to_vec()), result);
    }

    /// Scripts the raw response for a lookup in the proposal map.
    pub fn respond_map_entry(&self, key_hex: &str, result: Result<String, GatewayError>) {
        self.map_entries
            .insert((PROPOSAL_MAP.to_string(), key_hex.to_string()), result);
    }

    /// `get-current-block-height` returns `(ok height)`.
    pub fn with_block_height(self, height: u64) -> Self {
        let result = encoded(&Value::ok(Value::UInt128(u128::from(height))));
        self.respond_read_only(FN_GET_BLOCK_HEIGHT, &[], result);
        self
    }

    /// `get-category-count` returns `count`.
    pub fn with_category_count(self, count: u128) -> Self {
        self.respond_read_only(FN_GET_CATEGORY_COUNT, &[], encoded(&Value::UInt128(count)));
        self
    }

    /// `get-count-in-category` for `category_id` returns `count`.
    pub fn with_count_in_category(self, category_id: u128, count: u128) -> Self {
        self.respond_read_only(
            FN_GET_COUNT_IN_CATEGORY,
            &[uint_arg_hex(category_id)],
            encoded(&Value::UInt128(count)),
        );
        self
    }

    /// `get-proposal-status` for `(category_id, index)` returns `(ok status)`.
    pub fn with_status(self, category_id: u128, index: u128, status: u8) -> Self {
        self.respond_read_only(
            FN_GET_PROPOSAL_STATUS,
            &[uint_arg_hex(category_id), uint_arg_hex(index)],
            encoded(&Value::ok(Value::UInt128(u128::from(status)))),
        );
        self
    }

    /// Stores `(some fields)` at `(category_id, index)` in the proposal map.
    pub fn with_proposal(self, category_id: u128, index: u128, fields: Value) -> Self {
        self.respond_map_entry(
            &proposal_key(category_id, index),
            encoded(&Value::some(fields)),
        );
        self
    }

    /// Makes a read-only call fail with `error`.
    pub fn failing_read_only(self, function: &str, args: &[String], error: GatewayError) -> Self {
        self.respond_read_only(function, args, Err(error));
        self
    }

    /// Makes the map lookup for `(category_id, index)` fail with `error`.
    pub fn failing_proposal(self, category_id: u128, index: u128, error: GatewayError) -> Self {
        self.respond_map_entry(&proposal_key(category_id, index), Err(error));
        self
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// How many read-only calls of `function` were received.
    pub fn read_only_count(&self, function: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, GatewayCall::ReadOnly { function: f, .. } if f == function))
            .count()
    }

    fn record(&self, call: GatewayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl ContractGateway for MockContractGateway {
    async fn call_read_only(
        &self,
        function_name: &str,
        args: &[String],
    ) -> Result<String, GatewayError> {
        self.record(GatewayCall::ReadOnly {
            function: function_name.to_string(),
            args: args.to_vec(),
        });
        self.read_only
            .get(&(function_name.to_string(), args.to_vec()))
            .map(|r| r.value().clone())
            .unwrap_or_else(|| {
                Err(GatewayError::Status {
                    status: 404,
                    body: format!("no mock response for {}", function_name),
                })
            })
    }

    async fn get_map_entry(&self, map_name: &str, key_hex: &str) -> Result<String, GatewayError> {
        self.record(GatewayCall::MapEntry {
            map: map_name.to_string(),
            key_hex: key_hex.to_string(),
        });
        self.map_entries
            .get(&(map_name.to_string(), key_hex.to_string()))
            .map(|r| r.value().clone())
            .unwrap_or_else(|| encoded(&Value::none()))
    }
}
