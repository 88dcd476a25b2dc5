// Path: crates/types/src/codec/encode.rs

//! Canonical serializer. One value always produces exactly one byte sequence.

use super::value::{TypeTag, Value};
use crate::error::CodecError;

impl Value {
    /// Encodes the value into its canonical wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        encode_into(self, &mut out)?;
        Ok(out)
    }
}

/// Appends the canonical encoding of `value` to `out`.
///
/// On error `out` may hold a partial encoding and should be discarded.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
    match value {
        Value::Int128(v) => {
            out.push(TypeTag::Int as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::UInt128(v) => {
            out.push(TypeTag::UInt as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::Buffer(bytes) => {
            out.push(TypeTag::Buffer as u8);
            put_prefixed(out, bytes)?;
        }
        Value::Bool(true) => out.push(TypeTag::BoolTrue as u8),
        Value::Bool(false) => out.push(TypeTag::BoolFalse as u8),
        Value::StandardPrincipal(bytes) => {
            out.push(TypeTag::StandardPrincipal as u8);
            out.extend_from_slice(bytes);
        }
        Value::ContractPrincipal(issuer, name) => {
            if !name.is_ascii() {
                return Err(CodecError::NonAsciiText);
            }
            out.push(TypeTag::ContractPrincipal as u8);
            out.extend_from_slice(issuer);
            put_prefixed(out, name.as_bytes())?;
        }
        Value::Response { ok, inner } => {
            out.push(if *ok {
                TypeTag::ResponseOk as u8
            } else {
                TypeTag::ResponseErr as u8
            });
            encode_into(inner, out)?;
        }
        Value::Optional(None) => out.push(TypeTag::OptionalNone as u8),
        Value::Optional(Some(inner)) => {
            out.push(TypeTag::OptionalSome as u8);
            encode_into(inner, out)?;
        }
        Value::Tuple(fields) => {
            out.push(TypeTag::Tuple as u8);
            put_len(out, fields.len())?;
            for (name, field) in fields {
                let name = name.as_str().as_bytes();
                // FieldName guarantees at most 255 bytes.
                out.push(name.len() as u8);
                out.extend_from_slice(name);
                encode_into(field, out)?;
            }
        }
        Value::StringAscii(s) => {
            if !s.is_ascii() {
                return Err(CodecError::NonAsciiText);
            }
            out.push(TypeTag::StringAscii as u8);
            put_prefixed(out, s.as_bytes())?;
        }
        Value::StringUtf8(s) => {
            out.push(TypeTag::StringUtf8 as u8);
            put_prefixed(out, s.as_bytes())?;
        }
    }
    Ok(())
}

/// Encodes `items` as a list: tag, 4-byte count, then each item in order.
pub fn encode_list(items: &[Value]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    out.push(TypeTag::List as u8);
    put_len(&mut out, items.len())?;
    for item in items {
        encode_into(item, &mut out)?;
    }
    Ok(out)
}

fn put_len(out: &mut Vec<u8>, len: usize) -> Result<(), CodecError> {
    let len = u32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
    out.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn put_prefixed(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), CodecError> {
    put_len(out, bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PRINCIPAL_BYTES;

    #[test]
    fn test_uint_layout() {
        let bytes = Value::UInt128(1).encode().unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[16], 0x01);
        assert!(bytes[1..16].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_int_is_twos_complement() {
        let bytes = Value::Int128(-1).encode().unwrap();
        assert_eq!(bytes[0], 0x00);
        assert!(bytes[1..].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn test_bool_has_no_payload() {
        assert_eq!(Value::Bool(true).encode().unwrap(), vec![0x03]);
        assert_eq!(Value::Bool(false).encode().unwrap(), vec![0x04]);
    }

    #[test]
    fn test_buffer_and_strings_are_length_prefixed() {
        assert_eq!(
            Value::Buffer(b"abc".to_vec()).encode().unwrap(),
            vec![0x02, 0, 0, 0, 3, b'a', b'b', b'c']
        );
        assert_eq!(
            Value::StringAscii("hi".into()).encode().unwrap(),
            vec![0x0d, 0, 0, 0, 2, b'h', b'i']
        );
        // Length is in bytes, not characters.
        let utf8 = Value::StringUtf8("\u{e9}".into()).encode().unwrap();
        assert_eq!(&utf8[..5], &[0x0e, 0, 0, 0, 2]);
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert_eq!(
            Value::StringAscii("caf\u{e9}".into()).encode(),
            Err(CodecError::NonAsciiText)
        );
        assert_eq!(
            Value::ContractPrincipal([0; 21], "d\u{e9}o".into()).encode(),
            Err(CodecError::NonAsciiText)
        );
    }

    #[test]
    fn test_wrappers_prefix_inner() {
        assert_eq!(Value::none().encode().unwrap(), vec![0x09]);
        assert_eq!(Value::some(Value::Bool(true)).encode().unwrap(), vec![0x0a, 0x03]);
        assert_eq!(Value::ok(Value::Bool(false)).encode().unwrap(), vec![0x07, 0x04]);
        assert_eq!(Value::err(Value::Bool(false)).encode().unwrap(), vec![0x08, 0x04]);
    }

    #[test]
    fn test_tuple_layout() {
        let v = Value::tuple([("a", Value::Bool(true)), ("bc", Value::Bool(false))]).unwrap();
        assert_eq!(
            v.encode().unwrap(),
            vec![0x0c, 0, 0, 0, 2, 1, b'a', 0x03, 2, b'b', b'c', 0x04]
        );
    }

    #[test]
    fn test_standard_principal_layout() {
        let mut raw = [0u8; PRINCIPAL_BYTES];
        raw[0] = 0x1a;
        raw[20] = 0xee;
        let bytes = Value::StandardPrincipal(raw).encode().unwrap();
        let mut expected = vec![0x05, 0x1a];
        expected.extend_from_slice(&[0; 19]);
        expected.push(0xee);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_contract_principal_layout() {
        let mut raw = [0u8; PRINCIPAL_BYTES];
        raw[0] = 0x16;
        raw[20] = 0x01;
        let bytes = Value::ContractPrincipal(raw, "dao".into()).encode().unwrap();
        let mut expected = vec![0x06, 0x16];
        expected.extend_from_slice(&[0; 19]);
        expected.extend_from_slice(&[0x01, 0, 0, 0, 3, b'd', b'a', b'o']);
        assert_eq!(bytes, expected);
        assert_eq!(
            Value::decode(&expected).unwrap(),
            Value::ContractPrincipal(raw, "dao".into())
        );
    }

    #[test]
    fn test_list_layout() {
        assert_eq!(encode_list(&[]).unwrap(), vec![0x0b, 0, 0, 0, 0]);
        assert_eq!(
            encode_list(&[Value::Bool(true), Value::Bool(false)]).unwrap(),
            vec![0x0b, 0, 0, 0, 2, 0x03, 0x04]
        );
    }
}
