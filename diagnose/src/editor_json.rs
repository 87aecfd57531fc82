//! JSON editor dump adapter.
//!
//! A dump captures the editor's object graph as plain JSON, the way a host
//! page would serialize it:
//!
//! ```json
//! {
//!   "workspace": {
//!     "blocks": [
//!       {
//!         "type": "motor_on",
//!         "inputList": [
//!           { "fieldRow": [ { "name": "PORT", "value": "A" }, { "name": "SPEED", "text": "40" } ] }
//!         ],
//!         "fields": { "DIRECTION": "forward" }
//!       }
//!     ]
//!   },
//!   "surfaces": { ".blocklyWorkspace": "when started  motor A speed 40" }
//! }
//! ```
//!
//! Capabilities are probed by key presence: a field offers "current value"
//! when it has a scalar `value`, and "display text" when it has a string
//! `text`. Keys of the wrong JSON type count as absent. A `null` or missing
//! `workspace` means the editor has not loaded.

use std::collections::BTreeMap;
use std::path::Path;

use block_doctor_core::{AdvisoryMessage, ExtractionSnapshot, FieldValue};
use serde_json::Value;

use crate::error::Result;
use crate::extractor::{
    EditorBlock, EditorField, EditorInput, EditorSurface, EditorWorkspace, extract_snapshot,
};

/// Converts a scalar JSON value into a field value.
///
/// `null`, arrays and objects have no field representation.
pub fn field_value_from_json(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn array_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub struct JsonField(Value);

impl EditorField for JsonField {
    fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    fn current_value(&self) -> Option<FieldValue> {
        self.0.get("value").and_then(field_value_from_json)
    }

    fn display_text(&self) -> Option<String> {
        self.0.get("text").and_then(Value::as_str).map(String::from)
    }
}

pub struct JsonInput {
    fields: Vec<JsonField>,
}

impl EditorInput for JsonInput {
    fn field_row(&self) -> Vec<&dyn EditorField> {
        self.fields.iter().map(|f| f as &dyn EditorField).collect()
    }
}

pub struct JsonBlock {
    raw: Value,
    inputs: Vec<JsonInput>,
}

impl JsonBlock {
    fn from_value(raw: Value) -> Self {
        let inputs = array_at(&raw, "inputList")
            .iter()
            .map(|input| JsonInput {
                fields: array_at(input, "fieldRow")
                    .iter()
                    .cloned()
                    .map(JsonField)
                    .collect(),
            })
            .collect();
        Self { raw, inputs }
    }
}

impl EditorBlock for JsonBlock {
    fn kind(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    fn inputs(&self) -> Vec<&dyn EditorInput> {
        self.inputs.iter().map(|i| i as &dyn EditorInput).collect()
    }

    fn legacy_fields(&self) -> Option<Vec<(String, Option<FieldValue>)>> {
        let table = self.raw.get("fields")?.as_object()?;
        Some(
            table
                .iter()
                .map(|(name, value)| (name.clone(), field_value_from_json(value)))
                .collect(),
        )
    }
}

pub struct JsonWorkspace {
    blocks: Vec<JsonBlock>,
}

impl JsonWorkspace {
    /// Builds a workspace from `{"blocks": [...]}` or a bare block array.
    ///
    /// Returns `None` for `null`, which marks an unloaded editor. Any other
    /// shape is a loaded workspace with whatever blocks could be found.
    pub fn from_value(value: Value) -> Option<Self> {
        let blocks = match value {
            Value::Null => return None,
            Value::Array(blocks) => blocks,
            Value::Object(mut map) => match map.remove("blocks") {
                Some(Value::Array(blocks)) => blocks,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        Some(Self {
            blocks: blocks.into_iter().map(JsonBlock::from_value).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl EditorWorkspace for JsonWorkspace {
    fn blocks(&self) -> Vec<&dyn EditorBlock> {
        self.blocks.iter().map(|b| b as &dyn EditorBlock).collect()
    }
}

/// A captured editor page: the workspace graph plus rendered surface text.
#[derive(Default)]
pub struct EditorDump {
    pub workspace: Option<JsonWorkspace>,
    /// Selector to rendered plain text.
    pub surfaces: BTreeMap<String, String>,
}

impl EditorSurface for EditorDump {
    fn text_of(&self, selector: &str) -> Option<String> {
        self.surfaces.get(selector).cloned()
    }
}

impl EditorDump {
    /// Builds a dump from a parsed JSON document.
    pub fn from_value(mut value: Value) -> Self {
        let workspace = value
            .get_mut("workspace")
            .map(Value::take)
            .and_then(JsonWorkspace::from_value);
        let surfaces = value
            .get("surfaces")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(selector, text)| {
                        text.as_str().map(|t| (selector.clone(), t.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            workspace,
            surfaces,
        }
    }

    /// Parses a dump from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    /// Reads a dump from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Runs one extraction cycle over this dump.
    pub fn extract(&self, selectors: &[String]) -> ExtractionSnapshot {
        extract_snapshot(
            self.workspace
                .as_ref()
                .map(|w| w as &dyn EditorWorkspace),
            Some(self),
            selectors,
        )
    }
}

/// Returns `true` if `value` looks like an editor dump rather than an
/// advisory message.
pub fn is_editor_dump(value: &Value) -> bool {
    value.get("workspace").is_some() || value.get("surfaces").is_some()
}

/// Reads a file holding either an editor dump or an advisory message.
///
/// Dumps are extracted with `selectors` and wrapped as a snapshot message.
pub fn load_advisory_message(path: impl AsRef<Path>, selectors: &[String]) -> Result<AdvisoryMessage> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    if is_editor_dump(&value) {
        return Ok(EditorDump::from_value(value).extract(selectors).into());
    }
    Ok(serde_json::from_value(value)?)
}
