//! Output formatting for extraction snapshots.

use block_doctor_core::ExtractionSnapshot;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Formats a snapshot in the requested output format.
pub fn format_snapshot(snapshot: &ExtractionSnapshot, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(snapshot).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(snapshot_to_text(snapshot)),
    }
}

fn snapshot_to_text(snapshot: &ExtractionSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!("Blocks: {}\n", snapshot.records.len()));
    for record in &snapshot.records {
        out.push_str(&format!("  {}", record.kind));
        if !record.fields.is_empty() {
            let fields: Vec<String> = record
                .fields
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            out.push_str(&format!("  {}", fields.join(" ")));
        }
        out.push('\n');
    }

    if !snapshot.raw_text.is_empty() {
        out.push_str("\nRaw text:\n");
        out.push_str(&snapshot.raw_text);
        out.push('\n');
    }

    out
}
