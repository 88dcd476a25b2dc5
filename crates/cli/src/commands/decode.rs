// Path: crates/cli/src/commands/decode.rs

use crate::util::print_json;
use anyhow::{Context, Result};
use clap::Parser;
use govscan_types::codec::{decode_at, from_hex};
use serde_json::{json, Value as JsonValue};

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// A wire value as hex, with or without `0x`.
    pub hex: String,
}

/// Decodes the first value and reports how many bytes it used.
pub fn decode(hex: &str) -> Result<JsonValue> {
    let bytes = from_hex(hex).context("Invalid hex")?;
    let (value, used) = decode_at(&bytes, 0).context("Invalid wire value")?;
    if used < bytes.len() {
        log::warn!("ignoring {} trailing bytes", bytes.len() - used);
    }
    Ok(json!({
        "type": value.type_name(),
        "value": value.to_json(),
        "bytes": used,
    }))
}

pub fn run(args: DecodeArgs) -> Result<()> {
    print_json(&decode(&args.hex)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use govscan_types::keys::proposal_key_hex;

    #[test]
    fn test_decodes_proposal_key() {
        let out = decode(&proposal_key_hex(3, 7).unwrap()).unwrap();
        assert_eq!(out["type"], "tuple");
        assert_eq!(out["value"], json!({ "category-id": 3, "index": 7 }));
    }

    #[test]
    fn test_reports_consumed_length() {
        let out = decode("0x0309").unwrap();
        assert_eq!(out["value"], true);
        assert_eq!(out["bytes"], 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(decode("0xzz").is_err());
        assert!(decode("0xff").is_err());
    }
}
