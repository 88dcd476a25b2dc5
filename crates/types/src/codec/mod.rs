// Path: crates/types/src/codec/mod.rs

//! The tagged, self-describing binary value format used by the contract store.
//!
//! Every value opens with a one-byte [`TypeTag`] followed by a per-type
//! payload. Fixed-width integers are 16 bytes big-endian; buffers, strings
//! and contract names carry a 4-byte big-endian byte length; tuple field
//! names carry a 1-byte length. Values cross the network as `0x`-prefixed
//! lowercase hex, see [`to_hex`] and [`decode_hex`].
//!
//! Encoding is canonical, so encoded keys can be compared byte for byte.

mod decode;
mod encode;
mod value;

pub use decode::{decode_at, Reader};
pub use encode::{encode_into, encode_list};
pub use value::{FieldName, TypeTag, Value, MAX_FIELD_NAME_BYTES, PRINCIPAL_BYTES};

use crate::error::CodecError;

/// Renders bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses hex with or without a `0x` prefix.
pub fn from_hex(s: &str) -> Result<Vec<u8>, CodecError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(digits)?)
}

/// Hex-decodes `s` and decodes the value at offset 0.
pub fn decode_hex(s: &str) -> Result<Value, CodecError> {
    Value::decode(&from_hex(s)?)
}

/// Encodes `value` and renders it as `0x` hex.
pub fn encode_hex(value: &Value) -> Result<String, CodecError> {
    Ok(to_hex(&value.encode()?))
}
