//! Workspace extraction.
//!
//! Turns the live editor's dynamically shaped object graph into an
//! [`ExtractionSnapshot`]. The graph is reached through the capability
//! traits below; an adapter implements them for whatever host holds the
//! editor (see [`crate::editor_json`] for JSON dumps).
//!
//! Extraction is read-only and never fails: an absent workspace yields an
//! empty snapshot, and a block missing capabilities yields a record with
//! fewer fields.

pub mod strategies;

use block_doctor_core::{BlockRecord, ExtractionSnapshot, FieldValue, UNKNOWN_BLOCK_KIND};
use tracing::debug;

use strategies::ranked_record_sources;

/// Selectors tried, in order, to find the surface that renders the workspace.
pub const DEFAULT_SURFACE_SELECTORS: [&str; 4] = [
    ".blocklyWorkspace",
    ".blocklySvg",
    "#blocklyDiv",
    ".injectionDiv",
];

/// The editor's workspace: every block currently placed.
pub trait EditorWorkspace {
    /// Blocks in editor-native order.
    fn blocks(&self) -> Vec<&dyn EditorBlock>;
}

/// One block in the editor graph.
pub trait EditorBlock {
    fn kind(&self) -> Option<&str>;
    fn inputs(&self) -> Vec<&dyn EditorInput>;
    /// Legacy internal field table, if the block has one. `None` values are
    /// entries whose value is undefined.
    fn legacy_fields(&self) -> Option<Vec<(String, Option<FieldValue>)>>;
}

/// One input on a block, holding a row of fields.
pub trait EditorInput {
    fn field_row(&self) -> Vec<&dyn EditorField>;
}

/// One field object. Each capability returns `None` when not offered.
pub trait EditorField {
    fn name(&self) -> Option<&str>;
    fn current_value(&self) -> Option<FieldValue>;
    fn display_text(&self) -> Option<String>;
}

/// The rendered page around the editor.
pub trait EditorSurface {
    /// Plain text of the first region matching `selector`, if any.
    fn text_of(&self, selector: &str) -> Option<String>;
}

/// Builds the record for one block.
pub fn extract_record(block: &dyn EditorBlock) -> BlockRecord {
    let kind = block
        .kind()
        .filter(|kind| !kind.is_empty())
        .unwrap_or(UNKNOWN_BLOCK_KIND);
    let mut record = BlockRecord::new(kind);
    for source in ranked_record_sources() {
        source.collect(block, &mut record);
    }
    record
}

/// Renders the first available surface region as plain text.
pub fn surface_text(surface: &dyn EditorSurface, selectors: &[String]) -> String {
    selectors
        .iter()
        .find_map(|selector| surface.text_of(selector))
        .unwrap_or_default()
}

/// Runs one extraction cycle.
///
/// # Examples
///
/// ```
/// use block_doctor_diagnose::extractor::extract_snapshot;
///
/// let snapshot = extract_snapshot(None, None, &[]);
/// assert!(snapshot.records.is_empty());
/// assert_eq!(snapshot.raw_text, "");
/// ```
pub fn extract_snapshot(
    workspace: Option<&dyn EditorWorkspace>,
    surface: Option<&dyn EditorSurface>,
    selectors: &[String],
) -> ExtractionSnapshot {
    let Some(workspace) = workspace else {
        debug!("editor workspace unavailable; returning empty snapshot");
        return ExtractionSnapshot::empty();
    };

    let records: Vec<BlockRecord> = workspace
        .blocks()
        .into_iter()
        .map(extract_record)
        .collect();
    let raw_text = surface
        .map(|surface| surface_text(surface, selectors))
        .unwrap_or_default();

    debug!(
        records = records.len(),
        raw_text_len = raw_text.len(),
        "extraction cycle complete"
    );

    ExtractionSnapshot { records, raw_text }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Bare(Option<&'static str>);

    impl EditorBlock for Bare {
        fn kind(&self) -> Option<&str> {
            self.0
        }
        fn inputs(&self) -> Vec<&dyn EditorInput> {
            Vec::new()
        }
        fn legacy_fields(&self) -> Option<Vec<(String, Option<FieldValue>)>> {
            None
        }
    }

    struct Workspace(Vec<Bare>);

    impl EditorWorkspace for Workspace {
        fn blocks(&self) -> Vec<&dyn EditorBlock> {
            self.0.iter().map(|b| b as &dyn EditorBlock).collect()
        }
    }

    struct Page(HashMap<&'static str, &'static str>);

    impl EditorSurface for Page {
        fn text_of(&self, selector: &str) -> Option<String> {
            self.0.get(selector).map(|s| s.to_string())
        }
    }

    fn selectors() -> Vec<String> {
        DEFAULT_SURFACE_SELECTORS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blocks_without_capabilities_become_bare_records() {
        let workspace = Workspace(vec![Bare(Some("event_start")), Bare(None), Bare(Some(""))]);
        let snapshot = extract_snapshot(Some(&workspace), None, &selectors());
        let kinds: Vec<_> = snapshot.records.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, ["event_start", "unknown", "unknown"]);
        assert!(snapshot.records.iter().all(|r| r.fields.is_empty()));
        assert_eq!(snapshot.raw_text, "");
    }

    #[test]
    fn test_empty_workspace_yields_text_only_snapshot() {
        let page = Page(HashMap::from([("#blocklyDiv", "when started")]));
        let snapshot = extract_snapshot(Some(&Workspace(Vec::new())), Some(&page), &selectors());
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.raw_text, "when started");
    }

    #[test]
    fn test_surface_text_uses_first_matching_selector() {
        let page = Page(HashMap::from([
            (".blocklySvg", "svg text"),
            (".injectionDiv", "injection text"),
        ]));
        assert_eq!(surface_text(&page, &selectors()), "svg text");
        assert_eq!(surface_text(&page, &[]), "");
    }

    #[test]
    fn test_unavailable_workspace_ignores_surface() {
        let page = Page(HashMap::from([(".blocklyWorkspace", "text")]));
        let snapshot = extract_snapshot(None, Some(&page), &selectors());
        assert_eq!(snapshot, ExtractionSnapshot::empty());
    }
}
