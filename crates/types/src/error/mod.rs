// Path: crates/types/src/error/mod.rs
//! Core error types for govscan.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while encoding or decoding wire values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The decoder read a type tag with no defined layout.
    #[error("Unsupported value type tag 0x{0:02x}")]
    UnsupportedTag(u8),
    /// A fixed-width field or declared length needs more bytes than remain.
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// The number of bytes the field requires.
        needed: usize,
        /// The number of bytes left in the buffer.
        remaining: usize,
    },
    /// A hex string had odd length or contained non-hex characters.
    #[error("Malformed hex: {0}")]
    MalformedHex(String),
    /// A decoded value had a variant the caller could not use.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The shape the caller asked for.
        expected: &'static str,
        /// The variant actually present.
        found: &'static str,
    },
    /// An integer value did not fit the requested width.
    #[error("Integer does not fit in {target}")]
    IntegerOverflow {
        /// The target integer type.
        target: &'static str,
    },
    /// A tuple lacked a field the caller requires.
    #[error("Missing tuple field {0:?}")]
    MissingField(&'static str),
    /// Text that must be ASCII contained other bytes.
    #[error("Text is not ASCII")]
    NonAsciiText,
    /// A tuple field name was longer than 255 bytes or not ASCII.
    #[error("Invalid tuple field name: {0:?}")]
    InvalidFieldName(String),
    /// A length did not fit the 4-byte length prefix.
    #[error("Length {0} does not fit a 32-bit length prefix")]
    LengthOverflow(usize),
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedTag(_) => "CODEC_UNSUPPORTED_TAG",
            Self::TruncatedInput { .. } => "CODEC_TRUNCATED_INPUT",
            Self::MalformedHex(_) => "CODEC_MALFORMED_HEX",
            Self::TypeMismatch { .. } => "CODEC_TYPE_MISMATCH",
            Self::IntegerOverflow { .. } => "CODEC_INTEGER_OVERFLOW",
            Self::MissingField(_) => "CODEC_MISSING_FIELD",
            Self::NonAsciiText => "CODEC_NON_ASCII_TEXT",
            Self::InvalidFieldName(_) => "CODEC_INVALID_FIELD_NAME",
            Self::LengthOverflow(_) => "CODEC_LENGTH_OVERFLOW",
        }
    }
}

impl From<hex::FromHexError> for CodecError {
    fn from(e: hex::FromHexError) -> Self {
        Self::MalformedHex(e.to_string())
    }
}

/// Errors reported by a contract gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced an HTTP response (connect, timeout, I/O).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The node answered with a non-success HTTP status.
    #[error("Node returned HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// A snippet of the response body.
        body: String,
    },
    /// The contract call executed but the node reported a failure.
    #[error("Contract execution failed: {0}")]
    Execution(String),
    /// The node's response body did not have the expected shape.
    #[error("Invalid node response: {0}")]
    InvalidResponse(String),
}

impl ErrorCode for GatewayError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "GATEWAY_TRANSPORT",
            Self::Status { .. } => "GATEWAY_HTTP_STATUS",
            Self::Execution(_) => "GATEWAY_EXECUTION_FAILED",
            Self::InvalidResponse(_) => "GATEWAY_INVALID_RESPONSE",
        }
    }
}

impl GatewayError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures, throttling and server errors are transient; a
    /// contract that executed and failed will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Execution(_) | Self::InvalidResponse(_) => false,
        }
    }
}
