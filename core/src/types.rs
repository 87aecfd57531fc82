//! Block record type definitions.
//!
//! This module defines the structured, UI-free view of a block editor
//! workspace. Records are schema-open: field names are whatever the live
//! editor exposes for a block, so they are kept in a string-keyed map rather
//! than a struct per block kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind assigned to an editor block that does not report a type.
pub const UNKNOWN_BLOCK_KIND: &str = "unknown";

/// Value held by one block field.
///
/// Serialized untagged, so JSON numbers, strings and booleans map directly
/// onto the matching variant.
///
/// # Examples
///
/// ```
/// use block_doctor_core::FieldValue;
///
/// let speed: FieldValue = serde_json::from_str("40").unwrap();
/// assert_eq!(speed, FieldValue::Number(40.0));
/// assert_eq!(speed.to_string(), "40");
///
/// let port: FieldValue = serde_json::from_str("\"A\"").unwrap();
/// assert_eq!(port.to_string(), "A");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Returns the numeric reading of this value.
    ///
    /// Numbers are returned as-is. Text is accepted when it parses as a
    /// finite number after trimming, since editors commonly report numeric
    /// field values as strings. Booleans are never numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_doctor_core::FieldValue;
    ///
    /// assert_eq!(FieldValue::Number(55.0).as_number(), Some(55.0));
    /// assert_eq!(FieldValue::Text(" 60 ".into()).as_number(), Some(60.0));
    /// assert_eq!(FieldValue::Text("fast".into()).as_number(), None);
    /// assert_eq!(FieldValue::Bool(true).as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) | Self::Bool(_) => None,
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Returns the text if this is a [`FieldValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One extracted block: its stable type identifier plus an open field map.
///
/// `kind` is always present. `fields` may be empty; a missing field means
/// the editor did not expose it and is never an error.
///
/// # Examples
///
/// ```
/// use block_doctor_core::BlockRecord;
///
/// let record = BlockRecord::new("motor_on")
///     .with_field("PORT", "A")
///     .with_field("SPEED", 40);
///
/// assert!(record.kind_contains("MOTOR"));
/// assert_eq!(record.field("port").map(ToString::to_string), Some("A".into()));
/// assert!(record.field("DIRECTION").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Block type identifier reported by the editor.
    pub kind: String,
    /// Field name to value; insertion order is irrelevant.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl BlockRecord {
    /// Creates a record with no fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field, replacing any previous value under the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Inserts a field only if no field with that exact name exists yet.
    ///
    /// Returns `true` when the value was inserted.
    pub fn insert_if_absent(&mut self, name: &str, value: FieldValue) -> bool {
        if self.fields.contains_key(name) {
            return false;
        }
        self.fields.insert(name.to_string(), value);
        true
    }

    /// Looks up a field by name, ignoring ASCII case.
    ///
    /// An exact-case match wins over a case-insensitive one.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).or_else(|| {
            self.fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    /// Returns `true` if `kind` contains `keyword`, ignoring case.
    pub fn kind_contains(&self, keyword: &str) -> bool {
        self.kind
            .to_lowercase()
            .contains(keyword.to_lowercase().as_str())
    }
}

/// Result of one extraction cycle.
///
/// `raw_text` is a best-effort plain-text rendering of the visible editor
/// surface with no structural guarantees. Serialized with the camelCase
/// `rawText` key used on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSnapshot {
    #[serde(default)]
    pub records: Vec<BlockRecord>,
    #[serde(default, rename = "rawText")]
    pub raw_text: String,
}

impl ExtractionSnapshot {
    /// Snapshot returned when the editor workspace is not available.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when neither records nor raw text were captured.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.raw_text.is_empty()
    }
}
