// Path: crates/types/src/keys/mod.rs
//! Well-known contract names and the canonical proposal map key.
//!
//! These constants are the single source of truth for the read-only functions
//! and map names exposed by the proposal contract.

use crate::codec::{to_hex, FieldName, TypeTag, Value};
use crate::error::CodecError;

/// Read-only function returning the current block height.
pub const FN_GET_BLOCK_HEIGHT: &str = "get-current-block-height";
/// Read-only function returning the number of proposal categories.
pub const FN_GET_CATEGORY_COUNT: &str = "get-category-count";
/// Read-only function returning the number of proposals in one category.
pub const FN_GET_COUNT_IN_CATEGORY: &str = "get-count-in-category";
/// Read-only function returning a proposal's status code.
pub const FN_GET_PROPOSAL_STATUS: &str = "get-proposal-status";

/// The contract map holding proposal records.
pub const PROPOSAL_MAP: &str = "proposals";

/// Tuple field naming a proposal's category in keys and stale-set entries.
pub const FIELD_CATEGORY_ID: &str = "category-id";
/// Tuple field naming a proposal's index within its category.
pub const FIELD_INDEX: &str = "index";
/// Proposal field holding the block at which voting closes.
pub const FIELD_END_BLOCK: &str = "end-block";

/// The `{category-id, index}` tuple identifying a proposal.
///
/// Field order is fixed: the contract's key schema only matches this exact layout.
pub fn proposal_key_value(category_id: u128, index: u128) -> Value {
    Value::Tuple(vec![
        (field(FIELD_CATEGORY_ID), Value::UInt128(category_id)),
        (field(FIELD_INDEX), Value::UInt128(index)),
    ])
}

/// The encoded map key for the proposal at `(category_id, index)`.
pub fn proposal_key(category_id: u128, index: u128) -> Result<Vec<u8>, CodecError> {
    proposal_key_value(category_id, index).encode()
}

/// [`proposal_key`] as `0x` hex.
pub fn proposal_key_hex(category_id: u128, index: u128) -> Result<String, CodecError> {
    Ok(to_hex(&proposal_key(category_id, index)?))
}

/// A single unsigned argument for a read-only call, as `0x` hex.
pub fn uint_arg_hex(v: u128) -> String {
    let mut bytes = Vec::with_capacity(17);
    bytes.push(TypeTag::UInt as u8);
    bytes.extend_from_slice(&v.to_be_bytes());
    to_hex(&bytes)
}

fn field(name: &'static str) -> FieldName {
    FieldName::from_static(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_key_layout() {
        let key = proposal_key(3, 7).unwrap();
        let mut expected = vec![0x0c, 0, 0, 0, 2, 11];
        expected.extend_from_slice(b"category-id");
        expected.push(0x01);
        expected.extend_from_slice(&3u128.to_be_bytes());
        expected.push(5);
        expected.extend_from_slice(b"index");
        expected.push(0x01);
        expected.extend_from_slice(&7u128.to_be_bytes());
        assert_eq!(key, expected);
    }

    #[test]
    fn test_proposal_key_decodes_back() {
        let decoded = Value::decode(&proposal_key(3, 7).unwrap()).unwrap();
        let fields = decoded.expect_tuple().unwrap();
        assert_eq!(fields[0].0.as_str(), "category-id");
        assert_eq!(fields[1].0.as_str(), "index");
        assert_eq!(decoded.get("category-id"), Some(&Value::UInt128(3)));
        assert_eq!(decoded.get("index"), Some(&Value::UInt128(7)));
    }

    #[test]
    fn test_uint_arg_matches_codec() {
        assert_eq!(
            uint_arg_hex(12),
            crate::codec::encode_hex(&Value::UInt128(12)).unwrap()
        );
        assert_eq!(uint_arg_hex(1), format!("0x01{}01", "00".repeat(15)));
    }
}
