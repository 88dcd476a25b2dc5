// Path: crates/types/src/codec/value.rs

//! The in-memory representation of a decoded wire value.

use crate::error::CodecError;
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::fmt;

/// Length in bytes of a principal's raw form: one version byte and a 20-byte hash.
pub const PRINCIPAL_BYTES: usize = 21;

/// Maximum length in bytes of a tuple field name (it carries a 1-byte prefix).
pub const MAX_FIELD_NAME_BYTES: usize = u8::MAX as usize;

/// The one-byte type tag that opens every encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeTag {
    /// Signed 128-bit integer.
    Int = 0x00,
    /// Unsigned 128-bit integer.
    UInt = 0x01,
    /// Length-prefixed byte buffer.
    Buffer = 0x02,
    /// Boolean `true`, no payload.
    BoolTrue = 0x03,
    /// Boolean `false`, no payload.
    BoolFalse = 0x04,
    /// Standard principal (21 raw bytes).
    StandardPrincipal = 0x05,
    /// Contract principal (21 issuer bytes plus a name).
    ContractPrincipal = 0x06,
    /// `(ok v)` response.
    ResponseOk = 0x07,
    /// `(err v)` response.
    ResponseErr = 0x08,
    /// Absent optional.
    OptionalNone = 0x09,
    /// Present optional.
    OptionalSome = 0x0a,
    /// List of values. Encode-only in this crate.
    List = 0x0b,
    /// Ordered tuple of named fields.
    Tuple = 0x0c,
    /// ASCII string.
    StringAscii = 0x0d,
    /// UTF-8 string.
    StringUtf8 = 0x0e,
}

impl TypeTag {
    /// Maps a tag byte to a decodable type, or `None` if it has no layout.
    ///
    /// `List` is deliberately absent: lists are produced, never consumed.
    pub fn decodable(byte: u8) -> Option<Self> {
        Some(match byte {
            0x00 => Self::Int,
            0x01 => Self::UInt,
            0x02 => Self::Buffer,
            0x03 => Self::BoolTrue,
            0x04 => Self::BoolFalse,
            0x05 => Self::StandardPrincipal,
            0x06 => Self::ContractPrincipal,
            0x07 => Self::ResponseOk,
            0x08 => Self::ResponseErr,
            0x09 => Self::OptionalNone,
            0x0a => Self::OptionalSome,
            0x0c => Self::Tuple,
            0x0d => Self::StringAscii,
            0x0e => Self::StringUtf8,
            _ => return None,
        })
    }
}

/// A validated tuple field name: ASCII, at most 255 bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldName(String);

impl FieldName {
    /// Wraps a name known at compile time to be valid.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(name.len() <= MAX_FIELD_NAME_BYTES && name.is_ascii());
        Self(name.to_string())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FieldName {
    type Error = CodecError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        if name.len() > MAX_FIELD_NAME_BYTES || !name.is_ascii() {
            return Err(CodecError::InvalidFieldName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }
}

impl TryFrom<String> for FieldName {
    type Error = CodecError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::try_from(name.as_str())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A decoded wire value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed 128-bit integer.
    Int128(i128),
    /// Unsigned 128-bit integer.
    UInt128(u128),
    /// Raw byte buffer.
    Buffer(Vec<u8>),
    /// Boolean.
    Bool(bool),
    /// Standard principal, kept opaque.
    StandardPrincipal([u8; PRINCIPAL_BYTES]),
    /// Contract principal: issuer bytes and ASCII contract name.
    ContractPrincipal([u8; PRINCIPAL_BYTES], String),
    /// `(ok v)` or `(err v)`; both share one payload shape.
    Response {
        /// `true` for `ok`, `false` for `err`.
        ok: bool,
        /// The wrapped value.
        inner: Box<Value>,
    },
    /// `(some v)` or `none`.
    Optional(Option<Box<Value>>),
    /// Named fields in wire order.
    Tuple(Vec<(FieldName, Value)>),
    /// ASCII string.
    StringAscii(String),
    /// UTF-8 string.
    StringUtf8(String),
}

impl Value {
    /// Builds a tuple from `(name, value)` pairs, keeping the given order.
    pub fn tuple<'a, I>(fields: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        fields
            .into_iter()
            .map(|(name, value)| Ok((FieldName::try_from(name)?, value)))
            .collect::<Result<Vec<_>, CodecError>>()
            .map(Value::Tuple)
    }

    /// `(some v)`.
    pub fn some(inner: Value) -> Self {
        Value::Optional(Some(Box::new(inner)))
    }

    /// `none`.
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// `(ok v)`.
    pub fn ok(inner: Value) -> Self {
        Value::Response {
            ok: true,
            inner: Box::new(inner),
        }
    }

    /// `(err v)`.
    pub fn err(inner: Value) -> Self {
        Value::Response {
            ok: false,
            inner: Box::new(inner),
        }
    }

    /// A short, stable name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int128(_) => "int",
            Value::UInt128(_) => "uint",
            Value::Buffer(_) => "buffer",
            Value::Bool(_) => "bool",
            Value::StandardPrincipal(_) => "standard-principal",
            Value::ContractPrincipal(..) => "contract-principal",
            Value::Response { ok: true, .. } => "response-ok",
            Value::Response { ok: false, .. } => "response-err",
            Value::Optional(Some(_)) => "some",
            Value::Optional(None) => "none",
            Value::Tuple(_) => "tuple",
            Value::StringAscii(_) => "string-ascii",
            Value::StringUtf8(_) => "string-utf8",
        }
    }

    /// Interprets the value as a non-negative integer.
    ///
    /// A negative `Int128` is an overflow, any non-integer variant a mismatch.
    pub fn expect_u128(&self) -> Result<u128, CodecError> {
        match self {
            Value::UInt128(v) => Ok(*v),
            Value::Int128(v) => {
                u128::try_from(*v).map_err(|_| CodecError::IntegerOverflow { target: "u128" })
            }
            other => Err(CodecError::TypeMismatch {
                expected: "unsigned integer",
                found: other.type_name(),
            }),
        }
    }

    /// Borrows the fields of a tuple.
    pub fn expect_tuple(&self) -> Result<&[(FieldName, Value)], CodecError> {
        match self {
            Value::Tuple(fields) => Ok(fields),
            other => Err(CodecError::TypeMismatch {
                expected: "tuple",
                found: other.type_name(),
            }),
        }
    }

    /// Looks up a tuple field by name. Returns `None` for non-tuples too.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Tuple(fields) => fields
                .iter()
                .find(|(field, _)| field.as_str() == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Renders the value for display.
    ///
    /// Responses and optionals collapse to their inner value (`none` is
    /// `null`), integers outside the 64-bit range become decimal strings, and
    /// bytes become `0x` hex.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Int128(v) => match i64::try_from(*v) {
                Ok(small) => json!(small),
                Err(_) => json!(v.to_string()),
            },
            Value::UInt128(v) => match u64::try_from(*v) {
                Ok(small) => json!(small),
                Err(_) => json!(v.to_string()),
            },
            Value::Buffer(bytes) => json!(super::to_hex(bytes)),
            Value::Bool(b) => json!(b),
            Value::StandardPrincipal(bytes) => json!(super::to_hex(bytes)),
            Value::ContractPrincipal(issuer, name) => {
                json!(format!("{}.{}", super::to_hex(issuer), name))
            }
            Value::Response { inner, .. } => inner.to_json(),
            Value::Optional(Some(inner)) => inner.to_json(),
            Value::Optional(None) => JsonValue::Null,
            Value::Tuple(fields) => {
                let mut map = JsonMap::with_capacity(fields.len());
                for (name, value) in fields {
                    map.insert(name.to_string(), value.to_json());
                }
                JsonValue::Object(map)
            }
            Value::StringAscii(s) | Value::StringUtf8(s) => json!(s),
        }
    }
}
