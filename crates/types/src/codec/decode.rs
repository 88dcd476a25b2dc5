// Path: crates/types/src/codec/decode.rs

//! Recursive-descent parser over an untrusted byte buffer.
//!
//! Every read goes through [`Reader::take`], which refuses to step past the
//! end of the buffer. A value therefore never consumes more than its own
//! length fields declare, and a tuple's fields are decoded back to back from
//! wherever the previous field left the cursor.

use super::value::{FieldName, TypeTag, Value, PRINCIPAL_BYTES};
use crate::error::CodecError;

/// A forward-only cursor over an encoded buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Starts reading `buf` at offset `pos`.
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    /// The current offset into the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        let end = self.pos.checked_add(n).filter(|_| n <= remaining);
        match end.and_then(|end| self.buf.get(self.pos..end)) {
            Some(slice) => {
                self.pos += n;
                Ok(slice)
            }
            None => Err(CodecError::TruncatedInput {
                needed: n,
                remaining,
            }),
        }
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, CodecError> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    fn u32_len(&mut self) -> Result<usize, CodecError> {
        let len = u32::from_be_bytes(self.take_array()?);
        usize::try_from(len).map_err(|_| CodecError::LengthOverflow(len as usize))
    }

    fn prefixed(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.u32_len()?;
        self.take(len)
    }

    /// Decodes one value starting at the cursor and advances past it.
    pub fn read_value(&mut self) -> Result<Value, CodecError> {
        let byte = self.u8()?;
        let tag = TypeTag::decodable(byte).ok_or(CodecError::UnsupportedTag(byte))?;
        let value = match tag {
            TypeTag::Int => Value::Int128(i128::from_be_bytes(self.take_array()?)),
            TypeTag::UInt => Value::UInt128(u128::from_be_bytes(self.take_array()?)),
            TypeTag::Buffer => Value::Buffer(self.prefixed()?.to_vec()),
            TypeTag::BoolTrue => Value::Bool(true),
            TypeTag::BoolFalse => Value::Bool(false),
            TypeTag::StandardPrincipal => {
                Value::StandardPrincipal(self.take_array::<PRINCIPAL_BYTES>()?)
            }
            TypeTag::ContractPrincipal => {
                let issuer = self.take_array::<PRINCIPAL_BYTES>()?;
                let name = self.prefixed()?;
                if !name.is_ascii() {
                    return Err(CodecError::NonAsciiText);
                }
                Value::ContractPrincipal(issuer, ascii_to_string(name))
            }
            TypeTag::ResponseOk => Value::ok(self.read_value()?),
            TypeTag::ResponseErr => Value::err(self.read_value()?),
            TypeTag::OptionalNone => Value::none(),
            TypeTag::OptionalSome => Value::some(self.read_value()?),
            TypeTag::Tuple => {
                let count = self.u32_len()?;
                // Every field needs at least three bytes; don't trust `count` for allocation.
                let mut fields = Vec::with_capacity(count.min(self.remaining() / 3));
                for _ in 0..count {
                    let name_len = usize::from(self.u8()?);
                    let raw = self.take(name_len)?;
                    if !raw.is_ascii() {
                        return Err(CodecError::NonAsciiText);
                    }
                    let name = FieldName::try_from(ascii_to_string(raw))?;
                    let field = self.read_value()?;
                    fields.push((name, field));
                }
                Value::Tuple(fields)
            }
            TypeTag::StringAscii => Value::StringAscii(ascii_to_string(self.prefixed()?)),
            TypeTag::StringUtf8 => {
                Value::StringUtf8(String::from_utf8_lossy(self.prefixed()?).into_owned())
            }
            TypeTag::List => return Err(CodecError::UnsupportedTag(byte)),
        };
        Ok(value)
    }
}

/// Maps each byte to the code point of the same number.
fn ascii_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(*b)).collect()
}

/// Decodes one value from `buf` at `cursor`, returning it with the offset just past it.
pub fn decode_at(buf: &[u8], cursor: usize) -> Result<(Value, usize), CodecError> {
    let mut reader = Reader::new(buf, cursor);
    let value = reader.read_value()?;
    Ok((value, reader.position()))
}

impl Value {
    /// Decodes the value at the start of `bytes`. Trailing bytes are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_at(bytes, 0).map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_buffer_payload() {
        let mut bytes = Value::Buffer(b"abc".to_vec()).encode().unwrap();
        bytes.pop();
        assert_eq!(
            Value::decode(&bytes),
            Err(CodecError::TruncatedInput {
                needed: 3,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_truncated_fixed_width() {
        let bytes = Value::UInt128(9).encode().unwrap();
        assert!(matches!(
            Value::decode(&bytes[..10]),
            Err(CodecError::TruncatedInput { needed: 16, .. })
        ));
        assert!(matches!(
            Value::decode(&[]),
            Err(CodecError::TruncatedInput { needed: 1, remaining: 0 })
        ));
    }

    #[test]
    fn test_huge_declared_length_is_truncation() {
        let bytes = [0x02, 0xff, 0xff, 0xff, 0xff, 0x00];
        assert!(matches!(
            Value::decode(&bytes),
            Err(CodecError::TruncatedInput { .. })
        ));
        let tuple = [0x0c, 0xff, 0xff, 0xff, 0xff];
        assert!(matches!(
            Value::decode(&tuple),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_unsupported_tags() {
        assert_eq!(Value::decode(&[0xff]), Err(CodecError::UnsupportedTag(0xff)));
        assert_eq!(Value::decode(&[0x0f]), Err(CodecError::UnsupportedTag(0x0f)));
        // Lists are encode-only.
        assert_eq!(
            Value::decode(&[0x0b, 0, 0, 0, 0]),
            Err(CodecError::UnsupportedTag(0x0b))
        );
    }

    #[test]
    fn test_unsupported_tag_nested_in_tuple_aborts() {
        let bytes = [0x0c, 0, 0, 0, 1, 1, b'a', 0xee];
        assert_eq!(Value::decode(&bytes), Err(CodecError::UnsupportedTag(0xee)));
    }

    #[test]
    fn test_decode_at_reports_cursor() {
        let mut bytes = Value::Bool(true).encode().unwrap();
        let first_len = bytes.len();
        bytes.extend(Value::UInt128(5).encode().unwrap());
        let (first, cursor) = decode_at(&bytes, 0).unwrap();
        assert_eq!(first, Value::Bool(true));
        assert_eq!(cursor, first_len);
        let (second, end) = decode_at(&bytes, cursor).unwrap();
        assert_eq!(second, Value::UInt128(5));
        assert_eq!(end, bytes.len());
    }

    #[test]
    fn test_utf8_is_lossy() {
        let bytes = [0x0e, 0, 0, 0, 3, b'o', 0xff, b'k'];
        assert_eq!(
            Value::decode(&bytes),
            Ok(Value::StringUtf8("o\u{fffd}k".into()))
        );
    }

    #[test]
    fn test_ascii_string_bytes_map_to_code_points() {
        let bytes = [0x0d, 0, 0, 0, 2, b'o', b'k'];
        assert_eq!(Value::decode(&bytes), Ok(Value::StringAscii("ok".into())));
    }

    #[test]
    fn test_non_ascii_field_name_rejected() {
        let bytes = [0x0c, 0, 0, 0, 1, 1, 0xc3, 0x03];
        assert_eq!(Value::decode(&bytes), Err(CodecError::NonAsciiText));
    }

    #[test]
    fn test_empty_field_name_accepted() {
        let bytes = [0x0c, 0, 0, 0, 1, 0, 0x03];
        let value = Value::decode(&bytes).unwrap();
        assert_eq!(value, Value::tuple([("", Value::Bool(true))]).unwrap());
        assert_eq!(value.get(""), Some(&Value::Bool(true)));
    }
}
