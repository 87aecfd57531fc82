//! Capability-probe strategies for reading editor blocks.
//!
//! Editor field objects expose capabilities unpredictably, so each field is
//! read by walking [`ranked_field_strategies`] until one yields a value.
//! Blocks are read by walking [`ranked_record_sources`]; later sources only
//! fill in fields the earlier ones left unset.

use block_doctor_core::{BlockRecord, FieldValue};
use tracing::trace;

use super::{EditorBlock, EditorField};

/// One way of reading a value out of an editor field.
pub trait FieldReadStrategy {
    fn name(&self) -> &'static str;
    fn read(&self, field: &dyn EditorField) -> Option<FieldValue>;
}

/// Uses the field's "get current value" capability.
pub struct CurrentValueStrategy;

impl FieldReadStrategy for CurrentValueStrategy {
    fn name(&self) -> &'static str {
        "current-value"
    }

    fn read(&self, field: &dyn EditorField) -> Option<FieldValue> {
        field.current_value()
    }
}

/// Uses the field's "get current display text" capability.
pub struct DisplayTextStrategy;

impl FieldReadStrategy for DisplayTextStrategy {
    fn name(&self) -> &'static str {
        "display-text"
    }

    fn read(&self, field: &dyn EditorField) -> Option<FieldValue> {
        field.display_text().map(FieldValue::Text)
    }
}

/// Field read strategies in priority order.
pub fn ranked_field_strategies() -> [&'static dyn FieldReadStrategy; 2] {
    [&CurrentValueStrategy, &DisplayTextStrategy]
}

/// Reads one field with the first strategy that succeeds.
pub fn read_field(field: &dyn EditorField) -> Option<FieldValue> {
    ranked_field_strategies().into_iter().find_map(|strategy| {
        let value = strategy.read(field);
        if value.is_some() {
            trace!(field = field.name(), strategy = strategy.name(), "field read");
        }
        value
    })
}

/// One source of field data on an editor block.
pub trait RecordSource {
    fn name(&self) -> &'static str;
    /// Adds fields from this source to `record`, never overwriting.
    fn collect(&self, block: &dyn EditorBlock, record: &mut BlockRecord);
}

/// Field rows of every input on the block.
pub struct InputFieldRowSource;

impl RecordSource for InputFieldRowSource {
    fn name(&self) -> &'static str {
        "input-field-rows"
    }

    fn collect(&self, block: &dyn EditorBlock, record: &mut BlockRecord) {
        for input in block.inputs() {
            for field in input.field_row() {
                let Some(name) = field.name() else {
                    continue;
                };
                match read_field(field) {
                    Some(value) => {
                        record.insert_if_absent(name, value);
                    }
                    None => trace!(field = name, "field offers no readable capability"),
                }
            }
        }
    }
}

/// The block's legacy internal field table.
pub struct LegacyFieldTableSource;

impl RecordSource for LegacyFieldTableSource {
    fn name(&self) -> &'static str {
        "legacy-field-table"
    }

    fn collect(&self, block: &dyn EditorBlock, record: &mut BlockRecord) {
        let Some(entries) = block.legacy_fields() else {
            return;
        };
        for (name, value) in entries {
            if let Some(value) = value {
                record.insert_if_absent(&name, value);
            }
        }
    }
}

/// Record sources in priority order.
pub fn ranked_record_sources() -> [&'static dyn RecordSource; 2] {
    [&InputFieldRowSource, &LegacyFieldTableSource]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::EditorInput;

    struct Field {
        name: Option<&'static str>,
        value: Option<FieldValue>,
        text: Option<&'static str>,
    }

    impl EditorField for Field {
        fn name(&self) -> Option<&str> {
            self.name
        }
        fn current_value(&self) -> Option<FieldValue> {
            self.value.clone()
        }
        fn display_text(&self) -> Option<String> {
            self.text.map(String::from)
        }
    }

    struct Input(Vec<Field>);

    impl EditorInput for Input {
        fn field_row(&self) -> Vec<&dyn EditorField> {
            self.0.iter().map(|f| f as &dyn EditorField).collect()
        }
    }

    struct Block {
        inputs: Vec<Input>,
        legacy: Option<Vec<(String, Option<FieldValue>)>>,
    }

    impl EditorBlock for Block {
        fn kind(&self) -> Option<&str> {
            Some("motor_on")
        }
        fn inputs(&self) -> Vec<&dyn EditorInput> {
            self.inputs.iter().map(|i| i as &dyn EditorInput).collect()
        }
        fn legacy_fields(&self) -> Option<Vec<(String, Option<FieldValue>)>> {
            self.legacy.clone()
        }
    }

    #[test]
    fn test_current_value_wins_over_display_text() {
        let field = Field {
            name: Some("SPEED"),
            value: Some(FieldValue::Number(80.0)),
            text: Some("80%"),
        };
        assert_eq!(read_field(&field), Some(FieldValue::Number(80.0)));
    }

    #[test]
    fn test_display_text_is_fallback() {
        let field = Field {
            name: Some("PORT"),
            value: None,
            text: Some("B"),
        };
        assert_eq!(read_field(&field), Some(FieldValue::Text("B".into())));
    }

    #[test]
    fn test_field_without_capabilities_reads_nothing() {
        let field = Field {
            name: Some("LABEL"),
            value: None,
            text: None,
        };
        assert_eq!(read_field(&field), None);
    }

    #[test]
    fn test_legacy_table_supplements_without_overwriting() {
        let block = Block {
            inputs: vec![Input(vec![
                Field {
                    name: Some("PORT"),
                    value: Some("A".into()),
                    text: None,
                },
                Field {
                    name: None,
                    value: Some("ignored".into()),
                    text: None,
                },
            ])],
            legacy: Some(vec![
                ("PORT".into(), Some("Z".into())),
                ("SPEED".into(), Some(FieldValue::Number(40.0))),
                ("DIRECTION".into(), None),
            ]),
        };

        let mut record = BlockRecord::new("motor_on");
        for source in ranked_record_sources() {
            source.collect(&block, &mut record);
        }

        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields["PORT"], FieldValue::Text("A".into()));
        assert_eq!(record.fields["SPEED"], FieldValue::Number(40.0));
    }

    #[test]
    fn test_strategy_names_are_ordered() {
        let names: Vec<_> = ranked_field_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["current-value", "display-text"]);
        let sources: Vec<_> = ranked_record_sources().iter().map(|s| s.name()).collect();
        assert_eq!(sources, ["input-field-rows", "legacy-field-table"]);
    }
}
