// Path: crates/types/src/app/proposal.rs

use crate::codec::{encode_list, to_hex, FieldName, Value};
use crate::error::CodecError;
use crate::keys::{proposal_key_hex, proposal_key_value, FIELD_END_BLOCK};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// The status code of a proposal whose outcome has not been finalized on chain.
pub const STATUS_UNDECIDED: u8 = 2;

/// The two-level coordinate of a proposal. Both parts are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalKey {
    /// The category the proposal belongs to.
    #[serde(rename = "category-id")]
    pub category_id: u128,
    /// The proposal's position inside its category.
    pub index: u128,
}

impl ProposalKey {
    /// Creates a key for `(category_id, index)`.
    pub fn new(category_id: u128, index: u128) -> Self {
        Self { category_id, index }
    }

    /// The `{category-id, index}` tuple.
    pub fn to_value(&self) -> Value {
        proposal_key_value(self.category_id, self.index)
    }

    /// The encoded map key as `0x` hex.
    pub fn map_key_hex(&self) -> Result<String, CodecError> {
        proposal_key_hex(self.category_id, self.index)
    }
}

/// A proposal read from the contract map, tagged with where it was found.
///
/// This is a snapshot of one map entry at read time and is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRecord {
    key: ProposalKey,
    fields: Vec<(FieldName, Value)>,
}

impl ProposalRecord {
    /// Wraps a decoded map entry. The entry must be a tuple.
    pub fn from_value(key: ProposalKey, value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Tuple(fields) => Ok(Self { key, fields }),
            other => Err(CodecError::TypeMismatch {
                expected: "tuple",
                found: other.type_name(),
            }),
        }
    }

    /// Where this proposal lives.
    pub fn key(&self) -> ProposalKey {
        self.key
    }

    /// The proposal's category.
    pub fn category_id(&self) -> u128 {
        self.key.category_id
    }

    /// The proposal's index within its category.
    pub fn index(&self) -> u128 {
        self.key.index
    }

    /// The decoded fields in wire order.
    pub fn fields(&self) -> &[(FieldName, Value)] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field.as_str() == name)
            .map(|(_, value)| value)
    }

    /// The block at which voting closes.
    pub fn end_block(&self) -> Result<u128, CodecError> {
        self.field(FIELD_END_BLOCK)
            .ok_or(CodecError::MissingField(FIELD_END_BLOCK))?
            .expect_u128()
    }

    /// Whether voting is still open at `height`.
    ///
    /// A proposal ending exactly at `height` is already closed.
    pub fn is_active_at(&self, height: u128) -> Result<bool, CodecError> {
        Ok(self.end_block()? > height)
    }

    /// Renders the record as a JSON object: `category-id`, `index`, then the fields.
    pub fn to_json(&self) -> JsonValue {
        let mut out = json!({
            "category-id": json_uint(self.key.category_id),
            "index": json_uint(self.key.index),
        });
        if let Some(map) = out.as_object_mut() {
            for (name, value) in &self.fields {
                map.entry(name.to_string()).or_insert_with(|| value.to_json());
            }
        }
        out
    }
}

fn json_uint(v: u128) -> JsonValue {
    Value::UInt128(v).to_json()
}

/// The proposals whose voting window has closed but whose status is still undecided.
///
/// Entries are kept in scan order: category ascending, then index ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaleSet {
    entries: Vec<ProposalKey>,
}

impl StaleSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a proposal.
    pub fn push(&mut self, key: ProposalKey) {
        self.entries.push(key);
    }

    /// The collected proposals in scan order.
    pub fn entries(&self) -> &[ProposalKey] {
        &self.entries
    }

    /// Number of stale proposals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no stale proposals were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the set as a list of `{category-id, index}` tuples.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let items: Vec<Value> = self.entries.iter().map(ProposalKey::to_value).collect();
        encode_list(&items)
    }

    /// [`StaleSet::encode`] as `0x` hex.
    pub fn to_hex(&self) -> Result<String, CodecError> {
        Ok(to_hex(&self.encode()?))
    }
}

impl FromIterator<ProposalKey> for StaleSet {
    fn from_iter<I: IntoIterator<Item = ProposalKey>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
